use shub_kernel::{SAFE_ALPHABET, prefixed_id, safe_nanoid};

#[test]
fn generates_expected_length_and_charset() {
    let id = safe_nanoid!();
    assert_eq!(id.len(), 12);

    for ch in id.chars() {
        assert!(SAFE_ALPHABET.contains(&ch), "unexpected character in nanoid: {ch}");
    }
}

#[test]
fn custom_length() {
    let id = safe_nanoid!(20);
    assert_eq!(id.len(), 20);
}

#[test]
fn prefixed_ids_are_unique_and_tagged() {
    let a = prefixed_id("sub");
    let b = prefixed_id("sub");
    assert!(a.starts_with("sub_"));
    assert_eq!(a.len(), "sub_".len() + 12);
    assert_ne!(a, b);
}
