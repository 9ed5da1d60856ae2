//! Company identity printed on every report header.

use serde::{Deserialize, Deserializer, Serialize};

fn default_name() -> String {
    "Ingenieros AJV".to_string()
}

/// Environment values such as `3051234567` arrive as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyConfig {
    #[serde(default = "default_name", deserialize_with = "scalar_string")]
    pub name: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub address: String,

    #[serde(default, deserialize_with = "scalar_string")]
    pub phone: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            address: String::new(),
            phone: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::Figment;
    use figment::providers::{Format, Toml};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numeric_phone_reads_as_text() {
        let company: CompanyConfig = Figment::from(Toml::string("phone = 3051234567\naddress = 'Calle 10'"))
            .extract()
            .unwrap();
        assert_eq!(company.phone, "3051234567");
        assert_eq!(company.address, "Calle 10");
        assert_eq!(company.name, "Ingenieros AJV");
    }
}
