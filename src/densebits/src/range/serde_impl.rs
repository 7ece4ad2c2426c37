use serde::{
    de::Error as _, ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer,
};

use super::{FloatRangeSpec, RangeFloat, RangeInt, RangeSpec};

// Specs are (de)serialized through their declared bounds only. The
// derived bit counts are recomputed so they can never go stale.

#[derive(Deserialize)]
struct IntBounds<T> {
    min: T,
    max: T,
}

#[derive(Deserialize)]
struct FloatBounds<F> {
    min: F,
    max: F,
    precision: Option<F>,
    bits: Option<u32>,
}

impl<T: RangeInt + Serialize> Serialize for RangeSpec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RangeSpec", 2)?;
        state.serialize_field("min", &self.min)?;
        state.serialize_field("max", &self.max)?;
        state.end()
    }
}

impl<'de, T: RangeInt + Deserialize<'de>> Deserialize<'de> for RangeSpec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let IntBounds { min, max } = IntBounds::deserialize(deserializer)?;
        RangeSpec::try_new(min, max)
            .ok_or_else(|| D::Error::custom(format!("range minimum {min:?} exceeds maximum {max:?}")))
    }
}

impl<F: RangeFloat + Serialize> Serialize for FloatRangeSpec<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FloatRangeSpec", 3)?;
        state.serialize_field("min", &self.min)?;
        state.serialize_field("max", &self.max)?;
        if self.by_bits {
            state.serialize_field("bits", &self.bits)?;
        } else {
            state.serialize_field("precision", &self.precision())?;
        }
        state.end()
    }
}

impl<'de, F: RangeFloat + Deserialize<'de>> Deserialize<'de> for FloatRangeSpec<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bounds = FloatBounds::<F>::deserialize(deserializer)?;

        let spec = match (bounds.precision, bounds.bits) {
            (Some(precision), None) => FloatRangeSpec::try_new(bounds.min, bounds.max, precision),
            (None, Some(bits)) => FloatRangeSpec::try_with_bits(bounds.min, bounds.max, bits),
            _ => {
                return Err(D::Error::custom(
                    "float range needs exactly one of `precision` or `bits`",
                ))
            }
        };

        spec.ok_or_else(|| D::Error::custom("invalid float range bounds"))
    }
}
