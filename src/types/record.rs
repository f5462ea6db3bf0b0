use crate::coercion::Coercer;
use crate::types::conversion::LegacyMethod;
use crate::types::error::{Error, Result};
use crate::types::function::{self, Callable, hint_method, method0};
use crate::types::hint::Hint;
use crate::types::object::Object;
use crate::types::value::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

enum Slot {
    Inherited,
    Removed,
    Custom(Callable),
}

/// Object with named fields and optionally customised conversion methods.
pub struct Record {
    fields: BTreeMap<String, Value>,
    class_name: &'static str,
    override_hook: Option<Callable>,
    stringify: Slot,
    valuate: Slot,
}

impl Record {
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }

    fn slot(&self, method: LegacyMethod) -> &Slot {
        match method {
            LegacyMethod::Stringify => &self.stringify,
            LegacyMethod::Valuate => &self.valuate,
        }
    }
}

impl Object for Record {
    fn class_name(&self) -> &'static str {
        self.class_name
    }

    fn get_member(&self, name: &str) -> Result<Value> {
        if let Some(v) = self.fields.get(name) {
            return Ok(v.clone());
        }
        if let Some(method) = LegacyMethod::from_name(name)
            && let Some(callable) = self.conversion_method(method)
        {
            return Ok(function::new(callable));
        }
        Err(Error::UnknownMember {
            type_name: self.type_name().into(),
            member: name.to_string(),
        })
    }

    fn override_hook(&self) -> Option<Callable> {
        self.override_hook.clone()
    }

    fn conversion_method(&self, method: LegacyMethod) -> Option<Callable> {
        match self.slot(method) {
            Slot::Inherited => Some(method.inherited()),
            Slot::Removed => None,
            Slot::Custom(callable) => Some(callable.clone()),
        }
    }
}

pub struct RecordBuilder {
    fields: BTreeMap<String, Value>,
    class_name: &'static str,
    override_hook: Option<Callable>,
    stringify: Slot,
    valuate: Slot,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
            class_name: "Object",
            override_hook: None,
            stringify: Slot::Inherited,
            valuate: Slot::Inherited,
        }
    }
}

impl RecordBuilder {
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn class_name(mut self, class_name: &'static str) -> Self {
        self.class_name = class_name;
        self
    }

    /// Installs the override hook, which takes precedence over both legacy methods.
    pub fn on_primitive<F>(mut self, f: F) -> Self
    where
        F: Fn(&Coercer, &Value, Hint) -> Result<Value> + 'static,
    {
        self.override_hook = Some(hint_method(f));
        self
    }

    pub fn stringify<F>(mut self, f: F) -> Self
    where
        F: Fn(&Coercer, &Value) -> Result<Value> + 'static,
    {
        self.stringify = Slot::Custom(method0(f));
        self
    }

    pub fn valuate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Coercer, &Value) -> Result<Value> + 'static,
    {
        self.valuate = Slot::Custom(method0(f));
        self
    }

    pub fn without_stringify(mut self) -> Self {
        self.stringify = Slot::Removed;
        self
    }

    pub fn without_valuate(mut self) -> Self {
        self.valuate = Slot::Removed;
        self
    }

    pub fn build_record(self) -> Record {
        Record {
            fields: self.fields,
            class_name: self.class_name,
            override_hook: self.override_hook,
            stringify: self.stringify,
            valuate: self.valuate,
        }
    }

    pub fn build(self) -> Value {
        Value::Object(Rc::new(self.build_record()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_and_methods_are_members() {
        let rec = Record::builder().field("money", 1000).stringify(|_, _| Ok(Value::from("wallet"))).without_valuate().build();
        assert_eq!(rec.get_member("money").unwrap(), Value::from(1000));

        let cx = Coercer::new();
        let Value::Object(method) = rec.get_member("stringify").unwrap() else {
            panic!("expected a function");
        };
        assert_eq!(method.call(&cx, &rec, &[]).unwrap(), Value::from("wallet"));

        match rec.get_member("valuate") {
            Err(Error::UnknownMember { member, .. }) => assert_eq!(member, "valuate"),
            other => panic!("expected unknown member, got {:?}", other),
        }
    }

    #[test]
    fn slots_project_into_conversion_methods() {
        let rec = Record::builder().class_name("Wallet").without_stringify().build_record();
        assert!(rec.override_hook().is_none());
        assert!(rec.conversion_method(LegacyMethod::Stringify).is_none());
        assert!(rec.conversion_method(LegacyMethod::Valuate).is_some());
        assert_eq!(rec.class_name(), "Wallet");
    }
}
