//! The PDF object model the emitter serializes: indirect object ids,
//! primitive values, dictionaries and streams.

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Integer(i64),
    Real(f64),
    String(String),
    Name(String),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Stream(Dictionary, Vec<u8>),
    Reference(ObjectId),
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

/// A PDF dictionary that remembers insertion order.
///
/// Entries serialize in the order their keys were first set. Order is part
/// of the output bytes, and rendering the same report twice must produce
/// identical documents, so a randomized-iteration map is not usable here.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    entries: Vec<(String, Object)>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets `key`, replacing the value in place if the key already exists
    /// (its position is kept).
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Object>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Object)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// A PDF stream object: a dictionary describing raw data.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    dictionary: Dictionary,
    data: Vec<u8>,
}

impl Stream {
    pub fn new(data: Vec<u8>) -> Self {
        let mut dictionary = Dictionary::new();
        dictionary.set("Length", data.len() as i64);

        Self { dictionary, data }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[cfg(feature = "compression")]
    pub fn compress_flate(&mut self) -> Result<()> {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.data)?;
        self.data = encoder.finish()?;

        self.dictionary.set("Length", self.data.len() as i64);
        self.dictionary
            .set("Filter", Object::Name("FlateDecode".to_string()));

        Ok(())
    }
}

// Keeps the signature uniform when the feature is off; the writer calls
// this unconditionally.
#[cfg(not(feature = "compression"))]
impl Stream {
    pub fn compress_flate(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_accessors() {
        let id = ObjectId::new(7, 0);
        assert_eq!(id.number(), 7);
        assert_eq!(id.generation(), 0);
    }

    #[test]
    fn test_dictionary_set_and_get() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name("Catalog".to_string()));

        assert_eq!(dict.get("Type"), Some(&Object::Name("Catalog".to_string())));
        assert_eq!(dict.get("Missing"), None);
        assert!(dict.contains_key("Type"));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_dictionary_preserves_insertion_order() {
        let mut dict = Dictionary::new();
        dict.set("Zebra", Object::Integer(1));
        dict.set("Apple", Object::Integer(2));
        dict.set("Mango", Object::Integer(3));

        let keys: Vec<&str> = dict.entries().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_dictionary_set_replaces_in_place() {
        let mut dict = Dictionary::new();
        dict.set("First", Object::Integer(1));
        dict.set("Second", Object::Integer(2));
        dict.set("First", Object::Integer(99));

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("First"), Some(&Object::Integer(99)));

        let keys: Vec<&str> = dict.entries().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["First", "Second"]);
    }

    #[test]
    fn test_dictionary_empty() {
        let dict = Dictionary::new();
        assert!(dict.is_empty());
        assert_eq!(dict.len(), 0);
    }

    #[test]
    fn test_set_accepts_into_object() {
        let mut dict = Dictionary::new();
        dict.set("Length", 42i64);
        dict.set("Title", "Report".to_string());

        assert_eq!(dict.get("Length"), Some(&Object::Integer(42)));
        assert_eq!(dict.get("Title"), Some(&Object::String("Report".to_string())));
    }

    #[test]
    fn test_stream_new_sets_length() {
        let data = vec![1, 2, 3, 4, 5];
        let stream = Stream::new(data.clone());

        assert_eq!(stream.data(), &data);
        assert_eq!(stream.dictionary().get("Length"), Some(&Object::Integer(5)));
    }

    #[test]
    #[cfg(feature = "compression")]
    fn test_compress_flate() {
        let original = "BT /Helvetica 11 Tf 72.00 720.00 Td (text) Tj ET\n"
            .repeat(20)
            .into_bytes();
        let mut stream = Stream::new(original.clone());

        stream.compress_flate().unwrap();

        assert_ne!(stream.data(), &original[..]);
        assert!(stream.data().len() < original.len());
        assert_eq!(
            stream.dictionary().get("Filter"),
            Some(&Object::Name("FlateDecode".to_string()))
        );
        assert_eq!(
            stream.dictionary().get("Length"),
            Some(&Object::Integer(stream.data().len() as i64))
        );
    }

    #[test]
    #[cfg(feature = "compression")]
    fn test_compress_flate_deterministic() {
        let payload = b"0 0 m 100 0 l S\n".repeat(8).to_vec();

        let mut first = Stream::new(payload.clone());
        first.compress_flate().unwrap();
        let mut second = Stream::new(payload);
        second.compress_flate().unwrap();

        assert_eq!(first.data(), second.data());
    }
}
