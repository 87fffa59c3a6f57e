use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use catalog_core::{DomainError, RecordId};

/// Field the management API uses for the identifier.
pub const ID_FIELD: &str = "id";

/// Field the management API uses for the active flag.
pub const ACTIVE_FIELD: &str = "is_active";

/// Attribute stamped onto locally created products.
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Product identifier as issued by the management API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RecordId);

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<RecordId>().map(Self)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(RecordId::from(value))
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(RecordId::from(value))
    }
}

/// A catalog product as the management API returns it.
///
/// The row is kept exactly as received and serializes back to the same
/// JSON. The identifier, display name and active flag are read from it on
/// demand; a row without a usable `id` is still a product, it just cannot
/// be matched by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Option<ProductId>,
    row: Value,
}

impl Product {
    pub fn from_row(row: Value) -> Self {
        let id = row
            .get(ID_FIELD)
            .and_then(|id| RecordId::from_json(id).ok())
            .map(ProductId);
        Self { id, row }
    }

    pub fn id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }

    /// Display name; empty when the row has no string `name`.
    pub fn name(&self) -> &str {
        self.row.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    // Some endpoints report the flag as 0/1 or "ON"/"OFF" instead of a boolean.
    pub fn is_active(&self) -> bool {
        match self.row.get(ACTIVE_FIELD) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => matches!(s.as_str(), "1" | "true" | "ON" | "on"),
            _ => false,
        }
    }

    pub fn as_json(&self) -> &Value {
        &self.row
    }

    /// Shallow copy carrying a different active flag.
    ///
    /// Rows that are not JSON objects have nowhere to carry the flag and are
    /// copied unchanged.
    pub fn with_active(&self, active: bool) -> Self {
        let mut patched = self.clone();
        if let Value::Object(fields) = &mut patched.row {
            fields.insert(ACTIVE_FIELD.to_string(), Value::Bool(active));
        }
        patched
    }

    /// Build the local record for a product the server just accepted.
    ///
    /// The submitted payload is kept verbatim; the server-issued id, an
    /// active flag of `true` and the creation date (`dd/mm/yyyy`) are laid on
    /// top of it.
    pub fn from_submission(
        payload: &Map<String, Value>,
        id: ProductId,
        created_on: NaiveDate,
    ) -> Self {
        let mut fields = payload.clone();
        fields.insert(ID_FIELD.to_string(), id.0.to_json());
        fields.insert(ACTIVE_FIELD.to_string(), Value::Bool(true));
        fields.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::String(created_on.format("%d/%m/%Y").to_string()),
        );

        Self {
            id: Some(id),
            row: Value::Object(fields),
        }
    }
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_json().serialize(serializer)
    }
}
