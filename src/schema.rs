//! Record field schemas.
//!
//! A [`FieldSchema`] maps field names to typed accessors for one record type.
//! It is built once per type (see [`Record::schema`]) and consulted only while
//! a filter is being compiled; evaluation goes straight through the accessor.

use std::{collections::HashMap, fmt};

use crate::{ast::Field, error::FilterError, value::{Value, ValueType}};

/// Typed getter for one field of `R`.
pub enum FieldAccessor<R> {
    Int(fn(&R) -> i64),
    Str(fn(&R) -> &str),
    Bool(fn(&R) -> bool),
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldAccessor<R> {}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldAccessor({})", self.value_type())
    }
}

impl<R> FieldAccessor<R> {
    pub fn value_type(&self) -> ValueType {
        match self {
            FieldAccessor::Int(_) => ValueType::Int,
            FieldAccessor::Str(_) => ValueType::Str,
            FieldAccessor::Bool(_) => ValueType::Bool,
        }
    }

    /// Read the field into an owned [`Value`].
    pub fn read(&self, record: &R) -> Value {
        match self {
            FieldAccessor::Int(get) => Value::Int(get(record)),
            FieldAccessor::Str(get) => Value::Str(get(record).to_string()),
            FieldAccessor::Bool(get) => Value::Bool(get(record)),
        }
    }
}

/// A declared field: its name as spelled by the record type, and its accessor.
pub struct FieldDef<R> {
    pub name: String,
    pub accessor: FieldAccessor<R>,
}

impl<R> FieldDef<R> {
    pub fn value_type(&self) -> ValueType {
        self.accessor.value_type()
    }
}

impl<R> fmt::Debug for FieldDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("type", &self.value_type())
            .finish()
    }
}

/// Field name → accessor map for record type `R`.
///
/// Lookups ignore case: a field declared as `Views` resolves from `views`,
/// `VIEWS` or `vIeWs`.
///
/// # Examples
///
/// ```
/// use sieve_lang::{FieldSchema, ValueType};
///
/// struct Item {
///     name: String,
///     qty: i64,
/// }
///
/// impl Item {
///     fn name(&self) -> &str {
///         &self.name
///     }
/// }
///
/// let schema = FieldSchema::<Item>::new()
///     .string("Name", Item::name)
///     .int("Qty", |item: &Item| item.qty);
///
/// assert_eq!(schema.get("qty").map(|f| f.value_type()), Some(ValueType::Int));
/// assert!(schema.get("price").is_none());
/// ```
pub struct FieldSchema<R> {
    fields: Vec<FieldDef<R>>,
    index: HashMap<String, usize>,
}

impl<R> Default for FieldSchema<R> {
    fn default() -> Self {
        FieldSchema {
            fields: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<R> fmt::Debug for FieldSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

impl<R> FieldSchema<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Redeclaring a name (in any case) replaces the earlier entry.
    pub fn field(mut self, name: &str, accessor: FieldAccessor<R>) -> Self {
        let def = FieldDef {
            name: name.to_string(),
            accessor,
        };
        match self.index.get(&name.to_lowercase()) {
            Some(&slot) => self.fields[slot] = def,
            None => {
                self.index.insert(name.to_lowercase(), self.fields.len());
                self.fields.push(def);
            }
        }
        self
    }

    pub fn int(self, name: &str, get: fn(&R) -> i64) -> Self {
        self.field(name, FieldAccessor::Int(get))
    }

    pub fn string(self, name: &str, get: fn(&R) -> &str) -> Self {
        self.field(name, FieldAccessor::Str(get))
    }

    pub fn boolean(self, name: &str, get: fn(&R) -> bool) -> Self {
        self.field(name, FieldAccessor::Bool(get))
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&FieldDef<R>> {
        self.index
            .get(&name.to_lowercase())
            .map(|&slot| &self.fields[slot])
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef<R>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A record type that can be filtered.
///
/// The schema lives for the whole program, so implementors are `'static`.
pub trait Record: Sized + 'static {
    /// The schema of this type, built once.
    fn schema() -> &'static FieldSchema<Self>;
}

/// Resolve a field reference from a query against `schema`.
pub fn resolve_field<'s, R>(
    schema: &'s FieldSchema<R>,
    field: &Field,
) -> Result<&'s FieldDef<R>, FilterError> {
    schema.get(&field.name).ok_or_else(|| FilterError::UnknownField {
        name: field.name.clone(),
        position: field.position,
    })
}
