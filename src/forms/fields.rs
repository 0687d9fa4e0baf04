//! Per-field form state shared by the creation form and the edit session.

use crate::domain::{ClientField, ClientFields};
use crate::validation::{self, FieldError};

/// State of one form control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub dirty: bool,
}

/// The six client fields with their interaction state.
///
/// Validity is computed from the current values on every read, so it can
/// never lag behind an input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: [FieldState; 6],
}

impl FieldSet {
    /// All fields empty and untouched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fields holding the values of an existing record.
    pub fn seeded(values: &ClientFields) -> Self {
        let mut set = Self::empty();
        for field in ClientField::ALL {
            set.fields[field.index()].value = values.get(field).to_string();
        }
        set
    }

    pub fn state(&self, field: ClientField) -> &FieldState {
        &self.fields[field.index()]
    }

    pub fn value(&self, field: ClientField) -> &str {
        &self.fields[field.index()].value
    }

    /// Store a value. No event is raised; readers see it on their next read.
    pub fn set_value(&mut self, field: ClientField, value: String) {
        let state = &mut self.fields[field.index()];
        state.value = value;
        state.dirty = true;
    }

    pub fn touch(&mut self, field: ClientField) {
        self.fields[field.index()].touched = true;
    }

    pub fn mark_all_touched(&mut self) {
        for state in &mut self.fields {
            state.touched = true;
        }
    }

    pub fn is_touched(&self, field: ClientField) -> bool {
        self.fields[field.index()].touched
    }

    /// Rule verdict for a field, whether or not it was touched.
    pub fn error(&self, field: ClientField) -> Option<FieldError> {
        validation::validate(field, self.value(field)).err()
    }

    /// Message to display next to a field: only once it was touched.
    pub fn visible_error(&self, field: ClientField) -> Option<&'static str> {
        if self.is_touched(field) {
            self.error(field).map(|e| e.message)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        ClientField::ALL.into_iter().all(|field| self.error(field).is_none())
    }

    /// Current values as a record body, if every field passes its rule.
    pub fn to_fields(&self) -> Option<ClientFields> {
        if !self.is_valid() {
            return None;
        }
        Some(ClientFields {
            nombre: self.value(ClientField::Nombre).to_string(),
            apellido1: self.value(ClientField::Apellido1).to_string(),
            apellido2: self.value(ClientField::Apellido2).to_string(),
            direccion: self.value(ClientField::Direccion).to_string(),
            telefono: self.value(ClientField::Telefono).to_string(),
            sexo: self.value(ClientField::Sexo).parse().ok()?,
        })
    }

    /// Back to empty, untouched, pristine.
    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}
