use std::io;

use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;

/// How key/value pairs are written after the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KvStyle {
    /// Keys in colour, for terminals.
    #[default]
    Color,
    /// No styling, for log files.
    Plain,
}

#[derive(Debug, Deserialize)]
pub struct StructuredConsoleEncoderConfig {
    pub pattern: Option<String>,
    #[serde(default)]
    pub kv_style: KvStyle,
}

/// Pattern-formatted line followed by the record's key/value pairs.
#[derive(Debug)]
pub struct StructuredConsoleEncoder {
    delegate: PatternEncoder,
    kv_style: KvStyle,
}

impl StructuredConsoleEncoder {
    pub fn new(pattern: &str, kv_style: KvStyle) -> Self {
        Self {
            delegate: PatternEncoder::new(pattern),
            kv_style,
        }
    }
}

impl Encode for StructuredConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.delegate.encode(w, record)?;

        let mut visitor = TextVisitor {
            writer: w,
            kv_style: self.kv_style,
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
    kv_style: KvStyle,
    io_err: Option<io::Error>,
}

impl TextVisitor<'_> {
    fn write_pair(&mut self, key: &Key<'_>, value: &Value<'_>) -> io::Result<()> {
        if self.kv_style == KvStyle::Color {
            self.writer.set_style(Style::new().text(Color::Cyan))?;
        }
        write!(self.writer, " {}=", key)?;
        if self.kv_style == KvStyle::Color {
            self.writer.set_style(&Style::default())?;
        }
        write!(self.writer, "{}", value)
    }
}

impl<'kvs> VisitSource<'kvs> for TextVisitor<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        if let Err(e) = self.write_pair(&key, &value) {
            self.io_err = Some(e);
            return Err(Error::msg("io error during visit"));
        }
        Ok(())
    }
}

pub struct StructuredConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for StructuredConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = StructuredConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: StructuredConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or("{d} {l} {m}");
        Ok(Box::new(StructuredConsoleEncoder::new(pattern, config.kv_style)))
    }
}

#[cfg(test)]
mod tests {
    use log::Level;
    use log4rs::encode::writer::simple::SimpleWriter;

    use super::*;

    #[test]
    fn appends_key_values_after_the_message() {
        let encoder = StructuredConsoleEncoder::new("{l} {m}", KvStyle::Plain);
        let kvs: &[(&str, &str)] = &[("method", "GET"), ("path", "/beacon/head")];
        let mut writer = SimpleWriter(Vec::new());
        encoder
            .encode(
                &mut writer,
                &Record::builder()
                    .args(format_args!("HTTP: Sending API request"))
                    .level(Level::Debug)
                    .key_values(&kvs)
                    .build(),
            )
            .unwrap();
        assert_eq!(
            String::from_utf8(writer.0).unwrap(),
            "DEBUG HTTP: Sending API request method=GET path=/beacon/head\n"
        );
    }

    #[test]
    fn kv_style_defaults_to_color() {
        let config: StructuredConsoleEncoderConfig = serde_yaml::from_str("pattern: \"{m}\"").unwrap();
        assert_eq!(config.kv_style, KvStyle::Color);
        let config: StructuredConsoleEncoderConfig = serde_yaml::from_str("kv_style: plain").unwrap();
        assert_eq!(config.kv_style, KvStyle::Plain);
        assert!(config.pattern.is_none());
    }
}
