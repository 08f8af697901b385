use std::io;

use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::{Color, Encode, Style, Write, pattern::PatternEncoder};
use serde::Deserialize;

use super::{is_sensitive_key, mask_string};

#[derive(Debug, Deserialize)]
pub struct RedactingConsoleEncoderConfig {
    pub pattern: Option<String>,
}

/// Pattern encoder that appends the record's key/values, masking the values
/// of credential and contact fields.
#[derive(Debug)]
pub struct RedactingConsoleEncoder {
    delegate: PatternEncoder,
}

impl RedactingConsoleEncoder {
    pub fn new(pattern: &str) -> Self {
        Self {
            delegate: PatternEncoder::new(pattern),
        }
    }
}

impl Encode for RedactingConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.delegate.encode(w, record)?;

        let mut visitor = TextVisitor {
            writer: w,
            io_err: None,
        };

        if let Err(kv_err) = record.key_values().visit(&mut visitor) {
            if let Some(io_err) = visitor.io_err {
                return Err(io_err.into());
            }
            write!(w, " [KV Error: {}]", kv_err)?;
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

struct TextVisitor<'a> {
    writer: &'a mut dyn Write,
    io_err: Option<io::Error>,
}

impl<'kvs> VisitSource<'kvs> for TextVisitor<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        let result = (|| {
            self.writer.set_style(Style::new().text(Color::Cyan))?;
            write!(self.writer, " {}=", key)?;

            self.writer.set_style(&Style::default())?;
            if is_sensitive_key(key.as_str()) {
                write!(self.writer, "{}", mask_string(&value.to_string()))?;
            } else {
                write!(self.writer, "{}", value)?;
            }
            Ok::<(), io::Error>(())
        })();

        if let Err(e) = result {
            self.io_err = Some(e);
            return Err(Error::msg("io error during visit"));
        }

        Ok(())
    }
}

pub struct RedactingConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for RedactingConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = RedactingConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: RedactingConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or("{d} {l} {m}");
        Ok(Box::new(RedactingConsoleEncoder::new(pattern)))
    }
}
