use serde::Serialize;
use std::fmt::Display;

/// The type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// An on/off switch.
    Flag,
    /// A plain integer.
    Int,
    /// An owned, nullable piece of text (file paths, device names, machine ids).
    Text,
}

impl Kind {
    /// Parse the textual form of a value of this kind.
    ///
    /// Flags accept `true/false`, `yes/no`, `on/off` and any integer (non zero being on),
    /// since older stores kept every flag as a number.
    /// Text is taken as is, so this never fails for [Kind::Text].
    pub fn parse(self, text: &str) -> Option<Value> {
        match self {
            Kind::Flag => {
                let trimmed = text.trim();
                match trimmed.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" => Some(Value::Flag(true)),
                    "false" | "no" | "off" => Some(Value::Flag(false)),
                    _ => trimmed.parse::<i64>().ok().map(|n| Value::Flag(n != 0)),
                }
            }
            Kind::Int => text.trim().parse::<i32>().ok().map(Value::Int),
            Kind::Text => Some(Value::Text(Some(text.to_string()))),
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Kind::Flag => "flag",
            Kind::Int => "integer",
            Kind::Text => "text",
        })
    }
}

/// A setting's value, detached from any [Settings][crate::core::Settings].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Flag(bool),
    Int(i32),
    Text(Option<String>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Flag(_) => Kind::Flag,
            Value::Int(_) => Kind::Int,
            Value::Text(_) => Kind::Text,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Flag(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(Some(s)) => write!(f, "{:?}", s),
            Value::Text(None) => f.write_str("null"),
        }
    }
}

/// A built-in default, as stored in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Flag(bool),
    Int(i32),
    Text(Option<&'static str>),
}

impl DefaultValue {
    pub fn to_value(self) -> Value {
        match self {
            DefaultValue::Flag(b) => Value::Flag(b),
            DefaultValue::Int(n) => Value::Int(n),
            DefaultValue::Text(s) => Value::Text(s.map(String::from)),
        }
    }
}

/// Registry entry describing one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionInfo {
    /// The setting's name, used both as the store key and the override name
    pub name: &'static str,
    /// The built-in default
    pub default: DefaultValue,
    /// Whether the setting is written to the store.
    /// Settings such as `show_help` only ever come from the command line.
    pub persisted: bool,
}

impl OptionInfo {
    pub fn kind(&self) -> Kind {
        match self.default {
            DefaultValue::Flag(_) => Kind::Flag,
            DefaultValue::Int(_) => Kind::Int,
            DefaultValue::Text(_) => Kind::Text,
        }
    }
}

/// The Rust types a setting field can have.
///
/// Lets the generated name-keyed accessors move values in and out of fields without
/// knowing the field's type.
pub trait SettingType: Sized {
    fn to_value(&self) -> Value;
    /// Convert back into the field type, handing the value back if it is of another kind.
    fn from_value(value: Value) -> Result<Self, Value>;
    fn as_text_mut(&mut self) -> Option<&mut Option<String>> {
        None
    }
}

impl SettingType for bool {
    fn to_value(&self) -> Value {
        Value::Flag(*self)
    }
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Flag(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl SettingType for i32 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl SettingType for Option<String> {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(other),
        }
    }
    fn as_text_mut(&mut self) -> Option<&mut Option<String>> {
        Some(self)
    }
}
