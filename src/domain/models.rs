use serde::{Deserialize, Serialize};

/// A company record as returned by the remote API.
///
/// `revenue` and `stock_percentage` are carried as free text: the form
/// submits whatever the user typed, and the server may echo them back as
/// JSON numbers or strings depending on how the row was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Empresa {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub creation_date: String,
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub revenue: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub stock_percentage: String,
}

impl Empresa {
    /// One-line summary used for the clipboard copy action.
    pub fn summary(&self) -> String {
        format!(
            "{} (desde {}) | facturacion: {} | bolsa: {}% | {}",
            self.name,
            self.creation_date,
            self.revenue,
            self.stock_percentage,
            if self.is_active { "activa" } else { "no activa" }
        )
    }
}

/// Locally held, not-yet-submitted form state for a new company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmpresaDraft {
    pub name: String,
    pub description: String,
    pub creation_date: String,
    pub is_active: bool,
    pub revenue: String,
    pub stock_percentage: String,
}

impl Default for EmpresaDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            creation_date: String::new(),
            is_active: true,
            revenue: String::new(),
            stock_percentage: String::new(),
        }
    }
}

impl EmpresaDraft {
    /// Checks the draft before submission.
    ///
    /// Only `name` and `creation_date` are required; everything else is
    /// forwarded to the server as typed.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() || self.creation_date.trim().is_empty() {
            return Err("Por favor, rellena al menos el nombre y la fecha.");
        }
        Ok(())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft = EmpresaDraft::default();
        assert!(draft.name.is_empty());
        assert!(draft.is_active);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_requires_name_and_date() {
        let mut draft = EmpresaDraft {
            name: "Pilla Diamante".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());

        draft.creation_date = "1880-12-12".to_string();
        assert!(draft.validate().is_ok());

        draft.name = "   ".to_string();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_wire_field_names() {
        let draft = EmpresaDraft {
            name: "Acme".to_string(),
            creation_date: "2001-02-03".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("creationDate"));
        assert!(obj.contains_key("isActive"));
        assert!(obj.contains_key("stockPercentage"));
    }

    #[test]
    fn test_empresa_from_string_fields() {
        let json = r#"{
            "id": 7,
            "name": "Acme",
            "description": "Widgets",
            "creationDate": "1990-01-01",
            "isActive": true,
            "revenue": "435876",
            "stockPercentage": "49,9"
        }"#;
        let empresa: Empresa = serde_json::from_str(json).unwrap();
        assert_eq!(empresa.id, 7);
        assert_eq!(empresa.revenue, "435876");
        assert_eq!(empresa.stock_percentage, "49,9");
    }

    #[test]
    fn test_empresa_from_numeric_fields() {
        let json = r#"{
            "id": 1,
            "name": "Acme",
            "creationDate": "1990-01-01",
            "isActive": false,
            "revenue": 435876,
            "stockPercentage": 49.9
        }"#;
        let empresa: Empresa = serde_json::from_str(json).unwrap();
        assert_eq!(empresa.description, "");
        assert_eq!(empresa.revenue, "435876");
        assert_eq!(empresa.stock_percentage, "49.9");
        assert!(!empresa.is_active);
    }

    #[test]
    fn test_summary_mentions_name_and_state() {
        let empresa = Empresa {
            id: 3,
            name: "Acme".to_string(),
            description: String::new(),
            creation_date: "1990-01-01".to_string(),
            is_active: false,
            revenue: "12".to_string(),
            stock_percentage: "1".to_string(),
        };
        let summary = empresa.summary();
        assert!(summary.contains("Acme"));
        assert!(summary.contains("no activa"));
    }
}
