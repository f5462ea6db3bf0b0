use crate::builtins;
use crate::coercion::{Coercer, Limits};
use crate::operators::{self, ArithmeticOp, RelationalOp};
use crate::parser;
use crate::types::error::{Error, Result};
use crate::types::expression::{BinaryOp, Expr, UnaryOp};
use crate::types::value::Value;
use std::collections::{BTreeMap, HashMap};

pub trait VariableResolver {
    fn resolve(&self, name: &str) -> Option<Value>;
}

impl VariableResolver for HashMap<String, Value> {
    fn resolve(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl VariableResolver for BTreeMap<String, Value> {
    fn resolve(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

pub struct Evaluator<R: VariableResolver> {
    pub resolver: R,
    coercer: Coercer,
}

impl<R: VariableResolver> Evaluator<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_limits(resolver, Limits::default())
    }

    pub fn with_limits(resolver: R, limits: Limits) -> Self {
        Self {
            resolver,
            coercer: Coercer::with_limits(limits),
        }
    }

    pub fn coercer(&self) -> &Coercer {
        &self.coercer
    }

    pub fn evaluate_str(&self, input: &str) -> Result<Value> {
        let expr = parser::parse(input)?;
        self.evaluate(&expr)
    }

    // Evaluate a string with ${...} interpolations. Each interpolated value is
    // converted the way any string output is, so objects see the string hint.
    pub fn evaluate_interpolated(&self, input: &str) -> Result<String> {
        let mut out = String::new();
        let mut rest = input;
        while let Some(idx) = rest.find("${") {
            out.push_str(&rest[..idx]);
            let after = &rest[idx + 2..];
            let (expr, consumed) = parser::parse_in_braces(after)?;
            let val = self.evaluate(&expr)?;
            out.push_str(&operators::to_output_string(&self.coercer, &val)?);
            rest = &after[consumed..];
        }
        out.push_str(rest);
        Ok(out)
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(p) => Ok(Value::Primitive(p.clone())),
            Expr::Var(name) => self.resolver.resolve(name).or_else(|| builtins::lookup(name)).ok_or_else(|| Error::ResolveFailed(name.clone())),
            Expr::Member { object, field } => self.evaluate(object)?.get_member(field),
            Expr::Index { object, index } => {
                let target = self.evaluate(object)?;
                let key = self.eval_key(index)?;
                target.get_member(&key)
            }
            Expr::Call { callee, args } => self.eval_call(callee, args),
            Expr::Unary { op, expr } => {
                let v = self.evaluate(expr)?;
                match op {
                    UnaryOp::Plus => operators::unary_plus(&self.coercer, &v),
                    UnaryOp::Neg => operators::negate(&self.coercer, &v),
                }
            }
            Expr::Binary { op, left, right } => self.eval_binary(*op, left, right),
        }
    }

    fn eval_key(&self, index: &Expr) -> Result<String> {
        let key = self.evaluate(index)?;
        operators::to_property_key(&self.coercer, &key)
    }

    fn eval_call(&self, callee: &Expr, args: &[Expr]) -> Result<Value> {
        // A member callee supplies the receiver
        let (this, func) = match callee {
            Expr::Member { object, field } => {
                let this = self.evaluate(object)?;
                let func = this.get_member(field)?;
                (this, func)
            }
            Expr::Index { object, index } => {
                let this = self.evaluate(object)?;
                let key = self.eval_key(index)?;
                let func = this.get_member(&key)?;
                (this, func)
            }
            other => (Value::undefined(), self.evaluate(other)?),
        };
        let args = args.iter().map(|a| self.evaluate(a)).collect::<Result<Vec<_>>>()?;
        match &func {
            Value::Object(obj) => obj.call(&self.coercer, &this, &args),
            Value::Primitive(p) => Err(Error::NotCallable(p.type_name().into())),
        }
    }

    fn eval_binary(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<Value> {
        let l = self.evaluate(left)?;
        let r = self.evaluate(right)?;
        let cx = &self.coercer;
        match op {
            BinaryOp::Eq => Ok(Value::from(operators::loose_equals(cx, &l, &r)?)),
            BinaryOp::Ne => Ok(Value::from(!operators::loose_equals(cx, &l, &r)?)),
            BinaryOp::Lt => Ok(Value::from(operators::compare(cx, RelationalOp::Lt, &l, &r)?)),
            BinaryOp::Le => Ok(Value::from(operators::compare(cx, RelationalOp::Le, &l, &r)?)),
            BinaryOp::Gt => Ok(Value::from(operators::compare(cx, RelationalOp::Gt, &l, &r)?)),
            BinaryOp::Ge => Ok(Value::from(operators::compare(cx, RelationalOp::Ge, &l, &r)?)),
            BinaryOp::Add => operators::add(cx, &l, &r),
            BinaryOp::Sub => operators::arithmetic(cx, ArithmeticOp::Sub, &l, &r),
            BinaryOp::Mul => operators::arithmetic(cx, ArithmeticOp::Mul, &l, &r),
            BinaryOp::Div => operators::arithmetic(cx, ArithmeticOp::Div, &l, &r),
            BinaryOp::Mod => operators::arithmetic(cx, ArithmeticOp::Rem, &l, &r),
            BinaryOp::Pow => operators::arithmetic(cx, ArithmeticOp::Pow, &l, &r),
        }
    }
}
