//! Wire types for the auth and catalog services.
//!
//! The catalog service is loose about numbers (`precio` shows up both as a
//! JSON number and as a numeric string), so those fields decode leniently and
//! fall back to zero instead of failing the whole list.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// =============================================================================
// Catalog Types
// =============================================================================

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precio: f64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stock: i64,
    #[serde(default)]
    pub descripcion: Option<String>,
    /// Category reference; the service sends either an id, a name or an object
    #[serde(default)]
    pub categoria: Option<CategoryRef>,
}

impl Product {
    pub fn display_name(&self) -> &str {
        non_empty(self.nombre.as_deref()).unwrap_or("Unnamed product")
    }

    pub fn display_description(&self) -> &str {
        non_empty(self.descripcion.as_deref()).unwrap_or("No description.")
    }

    /// Price as shown in lists and detail screens, e.g. `$12.50`
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.precio)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre: Option<String>,
}

impl Category {
    pub fn display_name(&self) -> &str {
        non_empty(self.nombre.as_deref()).unwrap_or("Unknown name")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Name(String),
    Full(Category),
}

/// Products and categories from a single fetch cycle, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

// =============================================================================
// Auth Types
// =============================================================================

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of a 2xx `/auth/Login` response
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<i64>,
    /// Kept raw; see [`crate::session::Role::from_rol_id`]
    #[serde(default)]
    pub rol_id: Option<Value>,
    /// Everything else the auth service sends about the user
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Error body some non-2xx responses carry
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Lenient number decoding
// =============================================================================

fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from(&value).filter(|n| n.is_finite()).unwrap_or(0.0))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64),
        other => number_from(other).map(|n| n as i64).unwrap_or(0),
    })
}

/// Ids arrive as numbers or numeric strings. Anything else (including
/// fractional numbers) decodes as `None` so the row survives and the
/// detail guard rejects it later.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
