// Views serialize as their content and deserialize by borrowing from the
// input, so only formats that hand out borrowed strings or bytes can produce
// them.

use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error, Unexpected, Visitor},
};

use crate::{byte_slice::ByteSlice, char_slice::CharSlice, chars::Char};

impl Serialize for ByteSlice<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

impl Serialize for CharSlice<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_str() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_bytes(self.as_bytes()),
        }
    }
}

impl Serialize for Char {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.to_char() {
            Some(ch) => serializer.serialize_char(ch),
            None => serializer.serialize_bytes(&self.raw_bytes()),
        }
    }
}

struct ByteSliceVisitor;

impl<'de> Visitor<'de> for ByteSliceVisitor {
    type Value = ByteSlice<'de>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("borrowed bytes or a borrowed string")
    }

    fn visit_borrowed_bytes<E>(self, value: &'de [u8]) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(ByteSlice::new(value))
    }

    fn visit_borrowed_str<E>(self, value: &'de str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(ByteSlice::from(value))
    }
}

impl<'de: 'a, 'a> Deserialize<'de> for ByteSlice<'a> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_bytes(ByteSliceVisitor)
    }
}

struct CharSliceVisitor;

impl<'de> Visitor<'de> for CharSliceVisitor {
    type Value = CharSlice<'de>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a borrowed string")
    }

    fn visit_borrowed_str<E>(self, value: &'de str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(CharSlice::new(value))
    }

    fn visit_borrowed_bytes<E>(self, value: &'de [u8]) -> Result<Self::Value, E>
    where
        E: Error,
    {
        CharSlice::from_bytes(value)
            .map_err(|_| Error::invalid_value(Unexpected::Bytes(value), &self))
    }
}

impl<'de: 'a, 'a> Deserialize<'de> for CharSlice<'a> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(CharSliceVisitor)
    }
}

impl<'de> Deserialize<'de> for Char {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        char::deserialize(deserializer).map(Char::from)
    }
}
