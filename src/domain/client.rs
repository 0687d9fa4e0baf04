//! Client record and its identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned record identifier.
///
/// json-server style backends hand out either numbers or strings, so both
/// are accepted and written back untouched. Any JSON number is kept as is,
/// negative and fractional ones included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Number(serde_json::Number),
    Text(String),
}

impl ClientId {
    /// Whether the id can target an update or delete.
    ///
    /// `0` and blank strings count as missing.
    pub fn is_usable(&self) -> bool {
        match self {
            ClientId::Number(n) => !n.as_f64().is_some_and(|v| v == 0.0),
            ClientId::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientId::Number(n) => write!(f, "{}", n),
            ClientId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ClientId {
    fn from(id: u64) -> Self {
        ClientId::Number(id.into())
    }
}

/// Sex of the client. No default on purpose: the user has to pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sexo {
    Hombre,
    Mujer,
}

impl Sexo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sexo::Hombre => "hombre",
            Sexo::Mujer => "mujer",
        }
    }
}

impl fmt::Display for Sexo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is neither `hombre` nor `mujer`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sexo value '{0}'")]
pub struct UnknownSexo(pub String);

impl FromStr for Sexo {
    type Err = UnknownSexo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hombre" => Ok(Sexo::Hombre),
            "mujer" => Ok(Sexo::Mujer),
            other => Err(UnknownSexo(other.to_string())),
        }
    }
}

/// Editable fields of a client record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientField {
    Nombre,
    Apellido1,
    Apellido2,
    Direccion,
    Telefono,
    Sexo,
}

impl ClientField {
    /// Every field, in form order.
    pub const ALL: [ClientField; 6] = [
        ClientField::Nombre,
        ClientField::Apellido1,
        ClientField::Apellido2,
        ClientField::Direccion,
        ClientField::Telefono,
        ClientField::Sexo,
    ];

    /// Wire / form control name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientField::Nombre => "nombre",
            ClientField::Apellido1 => "apellido1",
            ClientField::Apellido2 => "apellido2",
            ClientField::Direccion => "direccion",
            ClientField::Telefono => "telefono",
            ClientField::Sexo => "sexo",
        }
    }

    /// Position in [`ClientField::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fields holding a person's name.
    pub fn is_name_like(&self) -> bool {
        matches!(
            self,
            ClientField::Nombre | ClientField::Apellido1 | ClientField::Apellido2
        )
    }
}

impl fmt::Display for ClientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for ClientField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Record body without the identifier. This is what a create sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFields {
    pub nombre: String,
    pub apellido1: String,
    pub apellido2: String,
    pub direccion: String,
    pub telefono: String,
    pub sexo: Sexo,
}

impl ClientFields {
    /// Current value of a field as the forms see it.
    pub fn get(&self, field: ClientField) -> &str {
        match field {
            ClientField::Nombre => &self.nombre,
            ClientField::Apellido1 => &self.apellido1,
            ClientField::Apellido2 => &self.apellido2,
            ClientField::Direccion => &self.direccion,
            ClientField::Telefono => &self.telefono,
            ClientField::Sexo => self.sexo.as_str(),
        }
    }

    /// Overwrite a text field. `sexo` only changes when `value` is a known literal.
    pub fn set(&mut self, field: ClientField, value: String) -> Result<(), UnknownSexo> {
        match field {
            ClientField::Nombre => self.nombre = value,
            ClientField::Apellido1 => self.apellido1 = value,
            ClientField::Apellido2 => self.apellido2 = value,
            ClientField::Direccion => self.direccion = value,
            ClientField::Telefono => self.telefono = value,
            ClientField::Sexo => self.sexo = value.parse()?,
        }
        Ok(())
    }
}

/// A client record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cliente {
    /// Assigned by the backend on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ClientId>,

    #[serde(flatten)]
    pub fields: ClientFields,
}

impl Cliente {
    /// Id if present and usable for update/delete targeting.
    pub fn usable_id(&self) -> Option<&ClientId> {
        self.id.as_ref().filter(|id| id.is_usable())
    }

    /// Short label for prompts and logs.
    pub fn display_name(&self) -> String {
        format!(
            "{} {} {}",
            self.fields.nombre, self.fields.apellido1, self.fields.apellido2
        )
    }
}
