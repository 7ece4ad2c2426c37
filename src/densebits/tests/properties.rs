use densebits::{
    container_size::{self, MAX_CONTAINER_SIZE},
    entropy, BitReader, BitWriter, Context, Error, FloatRangeSpec, RangeSpec, Visitor,
};
use proptest::prelude::*;

fn bounded_i64() -> impl Strategy<Value = (i64, i64, i64)> {
    (any::<i64>(), any::<i64>()).prop_flat_map(|(a, b)| {
        let (min, max) = (a.min(b), a.max(b));
        (Just(min), Just(max), min..=max)
    })
}

proptest! {
    #[test]
    fn range_round_trip((min, max, value) in bounded_i64()) {
        let spec = RangeSpec::new(min, max);
        let (mut value, mut res) = (value, 0);

        let mut ctx = Context::new();
        ctx.serializer().range(&mut value, &spec).unwrap();
        prop_assert_eq!(ctx.buffer_size(), (spec.bits_required() as usize).div_ceil(8));

        ctx.deserializer().range(&mut res, &spec).unwrap();
        prop_assert_eq!(res, value);
    }

    #[test]
    fn float_error_is_bounded_by_half_a_step(
        min in -1000.0f64..1000.0,
        span in 0.0f64..1000.0,
        precision in 0.001f64..10.0,
        t in 0.0f64..=1.0,
    ) {
        let max = min + span;
        let spec = FloatRangeSpec::new(min, max, precision);
        prop_assert!(spec.precision() <= precision * (1.0 + 1e-6));

        let mut value = (min + t * (max - min)).clamp(min, max);
        let mut res = 0.0;

        let mut ctx = Context::new();
        ctx.serializer().range_float(&mut value, &spec).unwrap();
        ctx.deserializer().range_float(&mut res, &spec).unwrap();

        let slack = 1e-9 * (min.abs() + max.abs() + 1.0);
        prop_assert!(
            (res - value).abs() <= spec.precision() / 2.0 + slack,
            "{} decoded as {} with step {}", value, res, spec.precision()
        );
    }

    #[test]
    fn out_of_range_is_always_rejected(min in -1000i32..1000, len in 0i32..1000, offset in 1i32..10_000, below: bool) {
        let spec = RangeSpec::new(min, min + len);
        let mut value = if below { min - offset } else { min + len + offset };

        let mut ctx = Context::new();
        let res = ctx.serializer().range(&mut value, &spec);

        let is_range_violation = matches!(res, Err(Error::RangeViolation { .. }));
        prop_assert!(is_range_violation);
        prop_assert_eq!(ctx.buffer_size(), 0);
    }

    #[test]
    fn container_size_prediction(count in 0..=MAX_CONTAINER_SIZE) {
        let mut writer = BitWriter::new();
        container_size::encode(&mut writer, count).unwrap();
        prop_assert_eq!(writer.written_bits(), container_size::size_in_bytes(count) * 8);

        let bytes = writer.into_inner();
        prop_assert_eq!(container_size::decode(&mut BitReader::new(&bytes)).unwrap(), count);
    }

    #[test]
    fn text_round_trip(mut text in proptest::collection::vec(any::<u8>(), 0..300)) {
        let mut res: Vec<u8> = Vec::new();

        let mut ctx = Context::new();
        ctx.serializer().text(&mut text).unwrap();
        prop_assert_eq!(
            ctx.buffer_size(),
            container_size::size_in_bytes(text.len()) + text.len()
        );

        ctx.deserializer().text(&mut res).unwrap();
        prop_assert_eq!(res, text);
    }

    #[test]
    fn entropy_round_trip(dictionary in proptest::collection::vec(any::<i16>(), 0..8), value: i16) {
        let (mut value, mut res) = (value, 0);

        let mut ctx = Context::new();
        ctx.serializer().entropy(&mut value, &dictionary).unwrap();
        ctx.deserializer().entropy(&mut res, &dictionary).unwrap();
        prop_assert_eq!(res, value);

        let index_bits = entropy::index_spec(dictionary.len()).bits_required() as usize;
        let value_bits = if dictionary.contains(&value) { 0 } else { 16 };
        prop_assert_eq!(ctx.buffer_size(), (index_bits + value_bits).div_ceil(8));
    }
}
