#![cfg(feature = "serde")]

use alloc::string::String;
use core::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::BigDec;

impl Serialize for BigDec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_radix(10))
    }
}

struct BigDecVisitor;

impl Visitor<'_> for BigDecVisitor {
    type Value = BigDec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigDec, E> {
        v.parse().map_err(de::Error::custom)
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<BigDec, E> {
        self.visit_str(&v)
    }
}

impl<'de> Deserialize<'de> for BigDec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<BigDec, D::Error> {
        deserializer.deserialize_str(BigDecVisitor)
    }
}
