use std::{cell::Cell, mem::size_of};

use densebits::{entropy, Context, Deserializer, Error, RangeSpec, Visit, Visitor};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Pair {
    a: i32,
    b: i32,
}

impl Pair {
    // Raw encoding of both fields.
    const SIZE: usize = 8;

    const fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }
}

impl Visit for Pair {
    fn visit<V: Visitor>(&mut self, v: &mut V) -> Result<(), Error> {
        v.value(&mut self.a)?;
        v.value(&mut self.b)
    }
}

const PAIRS: [Pair; 4] = [
    Pair::new(12, 10),
    Pair::new(485, 454),
    Pair::new(4849, 89),
    Pair::new(0, 1),
];

fn pair_in_range<V: Visitor>(v: &mut V, pair: &mut Pair) -> Result<(), Error> {
    let spec = RangeSpec::new(0, 10_000);
    v.range(&mut pair.a, &spec)?;
    v.range(&mut pair.b, &spec)
}

#[test]
fn found_value_only_writes_index() -> Result<(), Error> {
    let dictionary = [485, 4849, 89];
    let mut value = 4849i32;
    let mut res = 0i32;

    let mut ctx = Context::new();
    ctx.serializer().entropy(&mut value, &dictionary)?;
    ctx.deserializer().entropy(&mut res, &dictionary)?;

    assert_eq!(res, value);
    assert_eq!(ctx.buffer_size(), 1);

    // The index itself is a plain range-encoded value over [0, N].
    let mut index = 0usize;
    ctx.deserializer().range(&mut index, &RangeSpec::new(0, 3))?;
    assert_eq!(index, 1);

    Ok(())
}

#[test]
fn missing_value_writes_sentinel_and_raw_value() -> Result<(), Error> {
    let dictionary = [485i16, 4849, 89];
    let mut value = 8945i16;
    let mut res = 0i16;

    let mut ctx = Context::new();
    ctx.serializer().entropy(&mut value, &dictionary)?;
    ctx.deserializer().entropy(&mut res, &dictionary)?;

    assert_eq!(res, value);
    assert_eq!(ctx.buffer_size(), size_of::<i16>() + 1);

    let mut index = 0usize;
    ctx.deserializer().range(&mut index, &entropy::index_spec(3))?;
    assert_eq!(index, 3);

    Ok(())
}

#[test]
fn custom_type_found() -> Result<(), Error> {
    let mut value = Pair::new(12, 10);
    let mut res = Pair::default();

    let mut ctx = Context::new();
    ctx.serializer().entropy(&mut value, &PAIRS)?;
    ctx.deserializer().entropy(&mut res, &PAIRS)?;

    assert_eq!(res, value);
    assert_eq!(ctx.buffer_size(), 1);

    Ok(())
}

#[test]
fn custom_type_not_found() -> Result<(), Error> {
    let mut value = Pair::new(8945, 4456);
    let mut res = Pair::default();

    let mut ctx = Context::new();
    ctx.serializer().entropy(&mut value, &PAIRS)?;
    ctx.deserializer().entropy(&mut res, &PAIRS)?;

    assert_eq!(res, value);
    assert_eq!(ctx.buffer_size(), Pair::SIZE + 1);

    Ok(())
}

#[test]
fn custom_fallback_not_found() -> Result<(), Error> {
    let mut value = Pair::new(8945, 4456);
    let mut res = Pair::default();

    let mut ctx = Context::new();
    ctx.serializer()
        .entropy_with(&mut value, &PAIRS, pair_in_range)?;
    ctx.deserializer()
        .entropy_with(&mut res, &PAIRS, pair_in_range)?;

    assert_eq!(res, value);

    let index_bits = entropy::index_spec(PAIRS.len()).bits_required();
    let value_bits = RangeSpec::new(0, 10_000).bits_required();
    assert_eq!(index_bits, 3);
    assert_eq!(
        ctx.buffer_size(),
        (index_bits + value_bits * 2).div_ceil(8) as usize
    );

    Ok(())
}

#[test]
fn fallback_not_invoked_when_found() -> Result<(), Error> {
    let mut value = Pair::new(4849, 89);
    let mut res = Pair::default();
    let calls = Cell::new(0);

    let mut ctx = Context::new();
    ctx.serializer().entropy_with(&mut value, &PAIRS, |_, _| {
        calls.set(calls.get() + 1);
        Ok(())
    })?;
    ctx.deserializer().entropy_with(&mut res, &PAIRS, |_, _| {
        calls.set(calls.get() + 1);
        Err(Error::Format("fallback must not run"))
    })?;

    assert_eq!(calls.get(), 0);
    assert_eq!(res, value);
    assert_eq!(ctx.buffer_size(), 1);

    Ok(())
}

#[test]
fn duplicate_entries_use_first_index() -> Result<(), Error> {
    let dictionary = [7u8, 3, 7];
    let mut value = 7u8;

    let mut ctx = Context::new();
    ctx.serializer().entropy(&mut value, &dictionary)?;

    let mut index = usize::MAX;
    ctx.deserializer()
        .range(&mut index, &entropy::index_spec(dictionary.len()))?;
    assert_eq!(index, 0);

    Ok(())
}

#[test]
fn empty_dictionary_always_falls_back() -> Result<(), Error> {
    let mut value = 0xBEEFu16;
    let mut res = 0u16;

    let mut ctx = Context::new();
    ctx.serializer().entropy(&mut value, &[])?;
    ctx.deserializer().entropy(&mut res, &[])?;

    assert_eq!(res, value);
    assert_eq!(ctx.view(), &[0xEF, 0xBE]);

    Ok(())
}

#[test]
fn index_past_sentinel_is_rejected() {
    // Three index bits holding 7 for a dictionary of 4 entries.
    let mut res = Pair::default();
    let err = Deserializer::new(&[0b111])
        .entropy(&mut res, &PAIRS)
        .unwrap_err();

    assert!(matches!(err, Error::Format(_)), "unexpected error: {err:?}");
}

#[test]
fn truncated_index_is_rejected() {
    let mut res = Pair::default();
    let err = Deserializer::new(&[]).entropy(&mut res, &PAIRS).unwrap_err();

    assert!(matches!(err, Error::Format(_)), "unexpected error: {err:?}");
}

#[test]
fn truncated_fallback_value_underflows() {
    // Sentinel index 4, but only 5 bits of the raw value follow.
    let mut res = Pair::default();
    let err = Deserializer::new(&[0b100]).entropy(&mut res, &PAIRS).unwrap_err();

    assert!(
        matches!(err, Error::BufferUnderflow(_)),
        "unexpected error: {err:?}"
    );
}
