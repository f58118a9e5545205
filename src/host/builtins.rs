//! Core global callables for the reference host.
//!
//! These are the well-known globals a probe may assume exist on a
//! reasonable host: the baseline constructors and a few numeric
//! predicates. They are registered into a [`GlobalContext`] as
//! [`HostValue::Function`] bindings, and the locator's candidate list is
//! drawn from the same names.

use crate::host::context::GlobalContext;
use crate::host::error::EvalFailure;
use crate::host::object::new_object_ref;
use crate::host::value::{HostNumber, HostValue, NativeFn, NativeFunction};

lazy_static! {
    static ref CORE_GLOBALS: Vec<(&'static str, NativeFn)> = vec![
        ("Object", native_object as NativeFn),
        ("Array", native_array as NativeFn),
        ("String", native_string as NativeFn),
        ("Boolean", native_boolean as NativeFn),
        ("isFinite", native_is_finite as NativeFn),
        ("isNaN", native_is_nan as NativeFn),
        ("abs", native_abs as NativeFn),
        ("floor", native_floor as NativeFn),
    ];
}

/// Install the core globals into a context.
pub fn register_core_globals(ctx: &mut GlobalContext) {
    for (name, func) in CORE_GLOBALS.iter() {
        let global = NativeFunction {
            name: *name,
            func: *func,
        };
        ctx.define_binding(*name, HostValue::Function(global));
    }
}

/// Build an array value: an object with index properties and `length`.
pub fn make_array(elements: Vec<HostValue>) -> HostValue {
    let arr = new_object_ref(None);
    {
        let mut obj = arr.borrow_mut();
        for (i, element) in elements.iter().enumerate() {
            obj.set(i.to_string(), element.clone());
        }
        obj.set(
            "length",
            HostValue::Number(HostNumber::Integer(elements.len() as i64)),
        );
    }
    HostValue::Object(arr)
}

/// Plain string rendering used by the `String` global (no quoting).
pub fn value_to_display_string(value: &HostValue) -> String {
    match value {
        HostValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

fn native_object(_ctx: &mut GlobalContext, _args: Vec<HostValue>) -> Result<HostValue, EvalFailure> {
    Ok(HostValue::Object(new_object_ref(None)))
}

fn native_array(_ctx: &mut GlobalContext, args: Vec<HostValue>) -> Result<HostValue, EvalFailure> {
    Ok(make_array(args))
}

fn native_string(_ctx: &mut GlobalContext, args: Vec<HostValue>) -> Result<HostValue, EvalFailure> {
    let rendered = args
        .first()
        .map(value_to_display_string)
        .unwrap_or_default();
    Ok(HostValue::String(rendered))
}

fn native_boolean(_ctx: &mut GlobalContext, args: Vec<HostValue>) -> Result<HostValue, EvalFailure> {
    Ok(HostValue::Boolean(
        args.first().map(HostValue::is_truthy).unwrap_or(false),
    ))
}

fn native_is_finite(
    _ctx: &mut GlobalContext,
    args: Vec<HostValue>,
) -> Result<HostValue, EvalFailure> {
    match args.first() {
        Some(HostValue::Number(n)) => Ok(HostValue::Boolean(n.as_f64().is_finite())),
        _ => Ok(HostValue::Boolean(false)),
    }
}

fn native_is_nan(_ctx: &mut GlobalContext, args: Vec<HostValue>) -> Result<HostValue, EvalFailure> {
    match args.first() {
        Some(HostValue::Number(n)) => Ok(HostValue::Boolean(n.as_f64().is_nan())),
        _ => Ok(HostValue::Boolean(true)),
    }
}

fn native_abs(_ctx: &mut GlobalContext, args: Vec<HostValue>) -> Result<HostValue, EvalFailure> {
    match args.first() {
        Some(HostValue::Number(HostNumber::Integer(i))) => {
            Ok(HostValue::Number(HostNumber::Integer(i.wrapping_abs())))
        }
        Some(HostValue::Number(n)) => {
            Ok(HostValue::Number(HostNumber::from_f64(n.as_f64().abs())))
        }
        _ => Err(EvalFailure::TypeError(
            "abs expects a number".to_string(),
        )),
    }
}

fn native_floor(_ctx: &mut GlobalContext, args: Vec<HostValue>) -> Result<HostValue, EvalFailure> {
    match args.first() {
        Some(HostValue::Number(HostNumber::Integer(i))) => {
            Ok(HostValue::Number(HostNumber::Integer(*i)))
        }
        Some(HostValue::Number(n)) => {
            let f = n.as_f64().floor();
            if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                Ok(HostValue::Number(HostNumber::Integer(f as i64)))
            } else {
                Ok(HostValue::Number(HostNumber::from_f64(f)))
            }
        }
        _ => Err(EvalFailure::TypeError(
            "floor expects a number".to_string(),
        )),
    }
}
