use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::object::SimObject;

/// A schemaless simulation value. Keys and types are defined by domain hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean value.
    Boolean(bool),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A text value.
    String(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A string-keyed map of values.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// The integer inside, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The number inside as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            Self::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Map(_) => write!(f, "{{...}}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// The value mapping of a [`State`].
pub type Values = BTreeMap<String, Value>;

/// Snapshot of the simulation at one point in time.
///
/// Besides the free-form values, a state keeps the bookkeeping of which items
/// are in flight and which have finished. An item only reaches
/// `completed_events` by leaving `active_events`. A snapshot committed by the
/// run loop lists only the items completed in its own timeslot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Domain values keyed by name.
    pub values: Values,
    active_events: Vec<SimObject>,
    completed_events: Vec<SimObject>,
}

impl State {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state seeded with the given values and no event bookkeeping.
    pub fn from_values(values: Values) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Look up an integer value. Returns `None` if absent or not an integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    /// Look up a numeric value as a float.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_float)
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder form of [`State::set`], for hooks that consume and return a state.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Items currently in flight.
    pub fn active_events(&self) -> &[SimObject] {
        &self.active_events
    }

    /// Items that have finished, in completion order.
    pub fn completed_events(&self) -> &[SimObject] {
        &self.completed_events
    }

    /// The working state for the next timeslot.
    ///
    /// Values and in-flight items carry over; the completed list starts empty,
    /// so each snapshot only records what finished in its own timeslot.
    pub fn carry_forward(&self) -> Self {
        Self {
            values: self.values.clone(),
            active_events: self.active_events.clone(),
            completed_events: Vec::new(),
        }
    }

    /// Mark an item as in flight.
    pub fn activate(&mut self, item: SimObject) -> &mut Self {
        self.active_events.push(item);
        self
    }

    /// Move an item from the active list to the completed list.
    ///
    /// Matches by id, so a copy of the activated item completes it. Fails if
    /// no active item carries that id.
    pub fn complete_event(&mut self, item: &SimObject) -> CoreResult<&mut Self> {
        let pos = self
            .active_events
            .iter()
            .position(|active| active.id == item.id)
            .ok_or_else(|| CoreError::ActiveEventNotFound {
                id: item.id,
                name: item.name.clone(),
            })?;
        let done = self.active_events.remove(pos);
        self.completed_events.push(done);
        Ok(self)
    }
}
