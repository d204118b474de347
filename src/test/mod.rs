mod processor;
mod random;
mod util;
