use serde::ser::{self, Serialize};
use std::io::Write;

macro_rules! impl_disp_methods {
    ($(($method:ident, $ty:ty)),+ $(,)?) => {$(
        fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
            Ok(write!(self.writer, "{v}")?)
        }
    )+};
}

#[derive(Debug)]
pub(crate) struct Error(std::io::Error);

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self(e)
    }
}

impl ser::Error for Error {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self(std::io::Error::other(msg.to_string()))
    }
}

// A TOML-like report writer for the CLI
//
// Top-level struct fields are written as `key=value` lines, nested structs
// become inline tables `{key=value, ...}` and sequences are `(a, b, ...)`.
pub(crate) struct Logger<W: Write> {
    writer: W,
    depth: usize,
    started: bool,
}

impl<W: Write> Logger<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer, depth: 0, started: false }
    }

    pub(crate) fn title(&mut self, title: &str) -> std::io::Result<()> {
        if self.started {
            writeln!(self.writer)?;
        }
        self.started = true;
        writeln!(self.writer, "[{title}]")
    }

    /// Log a struct or a map, one field per line.
    pub(crate) fn log<S: Serialize + ?Sized>(&mut self, s: &S) -> std::io::Result<()> {
        s.serialize(&mut *self).map_err(|e| e.0)
    }

    /// Log a single `key=value` line.
    pub(crate) fn item<S: Serialize + ?Sized>(&mut self, key: &str, value: &S) -> std::io::Result<()> {
        write!(self.writer, "{key}=")?;
        self.depth += 1;
        let res = value.serialize(&mut *self).map_err(|e| e.0);
        self.depth -= 1;
        res?;
        writeln!(self.writer)
    }

    pub(crate) fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.writer
    }

    fn open_table(&mut self, prefix: &str) -> Result<Table<'_, W>, Error> {
        let inline = self.depth > 0;
        self.depth += 1;
        if inline {
            write!(self.writer, "{prefix}{{")?;
        }
        Ok(Table { logger: self, inline, first: true })
    }

    fn open_seq(&mut self, prefix: &str) -> Result<Seq<'_, W>, Error> {
        self.depth += 1;
        write!(self.writer, "{prefix}(")?;
        Ok(Seq { logger: self, first: true })
    }
}

impl<'a, W: Write> ser::Serializer for &'a mut Logger<W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Seq<'a, W>;
    type SerializeTuple = Seq<'a, W>;
    type SerializeTupleStruct = Seq<'a, W>;
    type SerializeTupleVariant = Seq<'a, W>;
    type SerializeMap = Table<'a, W>;
    type SerializeStruct = Table<'a, W>;
    type SerializeStructVariant = Table<'a, W>;

    impl_disp_methods!(
        (serialize_bool, bool),
        (serialize_i8, i8),
        (serialize_i16, i16),
        (serialize_i32, i32),
        (serialize_i64, i64),
        (serialize_u8, u8),
        (serialize_u16, u16),
        (serialize_u32, u32),
        (serialize_u64, u64),
        (serialize_char, char),
        (serialize_str, &str),
        (serialize_unit_struct, &'static str),
    );

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        self.serialize_f64(v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        Ok(write!(self.writer, "{v:.04}")?)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        use ser::SerializeSeq as _;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        v.iter().try_for_each(|b| seq.serialize_element(b))?;
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        Ok(write!(self.writer, "-")?)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        Ok(write!(self.writer, "{variant}")?)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        write!(self.writer, "{variant}(")?;
        value.serialize(&mut *self)?;
        Ok(write!(self.writer, ")")?)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        self.open_seq("")
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        self.open_seq("")
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        self.open_seq(name)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        self.open_seq(variant)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        self.open_table("")
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        self.open_table("")
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        self.open_table(variant)
    }
}

pub(crate) struct Seq<'a, W: Write> {
    logger: &'a mut Logger<W>,
    first: bool,
}

impl<W: Write> Seq<'_, W> {
    fn element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        if !std::mem::replace(&mut self.first, false) {
            write!(self.logger.writer, ", ")?;
        }
        value.serialize(&mut *self.logger)
    }

    fn close(self) -> Result<(), Error> {
        self.logger.depth -= 1;
        Ok(write!(self.logger.writer, ")")?)
    }
}

macro_rules! impl_ser_seq {
    ($(($ty:ident, $method:ident)),+ $(,)?) => {$(
        impl<W: Write> ser::$ty for Seq<'_, W> {
            type Ok = ();
            type Error = Error;

            fn $method<T>(&mut self, value: &T) -> Result<Self::Ok, Self::Error>
            where
                T: ?Sized + Serialize,
            {
                self.element(value)
            }

            fn end(self) -> Result<Self::Ok, Self::Error> {
                self.close()
            }
        }
    )+};
}

impl_ser_seq!(
    (SerializeSeq, serialize_element),
    (SerializeTuple, serialize_element),
    (SerializeTupleStruct, serialize_field),
    (SerializeTupleVariant, serialize_field),
);

pub(crate) struct Table<'a, W: Write> {
    logger: &'a mut Logger<W>,
    inline: bool,
    first: bool,
}

impl<W: Write> Table<'_, W> {
    fn key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Error> {
        if self.inline && !std::mem::replace(&mut self.first, false) {
            write!(self.logger.writer, ", ")?;
        }
        key.serialize(&mut *self.logger)?;
        Ok(write!(self.logger.writer, "=")?)
    }

    fn value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        value.serialize(&mut *self.logger)?;
        if !self.inline {
            writeln!(self.logger.writer)?;
        }
        Ok(())
    }

    fn close(self) -> Result<(), Error> {
        self.logger.depth -= 1;
        if self.inline {
            write!(self.logger.writer, "}}")?;
        }
        Ok(())
    }
}

impl<W: Write> ser::SerializeMap for Table<'_, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.key(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.value(value)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.close()
    }
}

macro_rules! impl_ser_struct {
    ($($ty:ident),+ $(,)?) => {$(
        impl<W: Write> ser::$ty for Table<'_, W> {
            type Ok = ();
            type Error = Error;

            fn serialize_field<T>(
                &mut self,
                key: &'static str,
                value: &T,
            ) -> Result<Self::Ok, Self::Error>
            where
                T: ?Sized + Serialize,
            {
                self.key(key)?;
                self.value(value)
            }

            fn end(self) -> Result<Self::Ok, Self::Error> {
                self.close()
            }
        }
    )+};
}

impl_ser_struct!(SerializeStruct, SerializeStructVariant);
