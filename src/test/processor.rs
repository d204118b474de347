use {
    crate::{Decrypter, Encrypter, Key, KeyError, OsRandomSource, Primer, PrimerError},
    rand::Rng,
    std::sync::Arc,
};

fn tiny_key() -> Key {
    Key::from_data(vec![vec![b'A', b'B', b'C'], vec![b'A', b'B', b'C'], vec![b'A', b'B', b'C']])
        .unwrap()
}

#[test]
fn round_trip_through_non_alphabet_pass_through() {
    let key = Arc::new(tiny_key());
    let primer = Primer::for_key(vec![b'A', b'B'], &key).unwrap();

    let plaintext = b"aCBAacbcAbcAcbAcCcCACAAaaBcccCBBBbBcCaCb".to_vec();
    let mut enc = Encrypter::new(key.clone(), &primer).unwrap();
    let ciphertext = enc.process(&plaintext);

    assert_eq!(ciphertext, b"aABAacbcBbcAcbAcCcBBBCCaaBcccABBAbAcBaCb".to_vec());

    let mut dec = Decrypter::new(key, &primer).unwrap();
    let decrypted = dec.process(&ciphertext);
    assert_eq!(decrypted, plaintext);
}

#[test]
fn lowercase_bytes_outside_alphabet_do_not_advance_history() {
    let key = Arc::new(tiny_key());
    let primer = Primer::for_key(vec![b'A', b'B'], &key).unwrap();
    let mut enc = Encrypter::new(key.clone(), &primer).unwrap();

    let before = enc.current_primer();
    enc.process(b"zzzzz");
    let after = enc.current_primer();
    assert_eq!(before, after);
}

#[test]
fn state_continuation_matches_resuming_from_exported_primer() {
    let key = Arc::new(tiny_key());
    let primer = Primer::for_key(vec![b'A', b'B'], &key).unwrap();

    let mut e1 = Encrypter::new(key.clone(), &primer).unwrap();
    let a = b"ABCABC".to_vec();
    let out_a = e1.process(&a);
    let continuation = e1.current_primer();

    let b = b"CBACBA".to_vec();
    let out_b_from_e1 = e1.process(&b);

    let mut e2 = Encrypter::new(key, &continuation).unwrap();
    let out_b_from_e2 = e2.process(&b);

    assert_eq!(out_b_from_e1, out_b_from_e2);
    assert!(!out_a.is_empty());
}

#[test]
fn primer_exported_immediately_equals_its_own_data() {
    let mut random = OsRandomSource;
    let key = Arc::new(Key::create(b"qwerty", 6, &mut random).unwrap());
    let p0 = Primer::create(&key, &mut random);
    let e = Encrypter::new(key, &p0).unwrap();
    let p1 = e.current_primer();
    assert_eq!(p0.data(), p1.data());
}

#[test]
fn rejects_incompatible_primer() {
    let key = Arc::new(tiny_key());
    let bad_primer = Primer::from_data(vec![b'A']).unwrap();
    assert!(matches!(Encrypter::new(key, &bad_primer), Err(PrimerError::Length { .. })));
}

#[test]
fn randomized_stress_round_trip() {
    let mut random = OsRandomSource;
    let mut harness = rand::thread_rng();
    for _ in 0..10 {
        let alphabet_len: usize = harness.gen_range(1..=10);
        let alphabet: Vec<u8> = (0..alphabet_len).map(|_| harness.gen()).collect();
        let chain_size: usize = harness.gen_range(2..=10);

        let key = match Key::create(&alphabet, chain_size, &mut random) {
            Ok(key) => Arc::new(key),
            Err(KeyError::Shape) => continue, // fewer than 2 distinct bytes drawn
            Err(other) => panic!("unexpected key error: {other}"),
        };
        let primer = Primer::create(&key, &mut random);

        for _ in 0..harness.gen_range(1..=10) {
            let len: usize = harness.gen_range(1..=20);
            let plaintext: Vec<u8> = (0..len).map(|_| harness.gen()).collect();

            let mut enc = Encrypter::new(key.clone(), &primer).unwrap();
            let ciphertext = enc.process(&plaintext);
            assert_eq!(ciphertext.len(), plaintext.len());

            let mut dec = Decrypter::new(key.clone(), &primer).unwrap();
            let decrypted = dec.process(&ciphertext);
            assert_eq!(decrypted, plaintext);
        }
    }
}
