//! Custom handlers driving the shared walk from outside the crate.

use dotpath::{
    AccessError, Address, Error, Path, Result, Value,
    traverse::{Flow, Step, StepHandler, Walked, walk},
};

use crate::helpers::*;

/// Finds the longest prefix of the path that exists.
struct DeepestExisting;

impl<'a> StepHandler<&'a Value> for DeepestExisting {
    type Output = String;

    fn step(&mut self, step: &mut Step<'_, &'a Value>) -> Result<Flow<String>> {
        if !step.exists() {
            let reached = step.path().segments().take(step.index()).collect::<Vec<_>>();
            return Ok(Flow::Finish(reached.join(".")));
        }
        if step.is_last() {
            return Ok(Flow::Finish(step.prefix()));
        }
        Ok(Flow::Continue)
    }
}

/// Appends to a list at the final segment, creating docs and the list as needed.
struct Append(Value);

impl<'a> StepHandler<&'a mut Value> for Append {
    type Output = ();

    fn step(&mut self, step: &mut Step<'_, &'a mut Value>) -> Result<Flow<()>> {
        if !step.is_last() {
            if !step.exists() {
                step.set_next(Value::doc())?;
            }
            return Ok(Flow::Continue);
        }

        let item = std::mem::take(&mut self.0);
        let key = step.key().to_string();
        if matches!(step.next(), Some(Value::List(_))) {
            if let Some(Value::List(items)) = step.doc_mut()?.get_mut(&key) {
                items.push(item);
            }
        } else {
            step.set_next(Value::List(vec![item]))?;
        }
        Ok(Flow::Take)
    }
}

/// Never finishes.
struct Wander;

impl<'a> StepHandler<&'a Value> for Wander {
    type Output = ();

    fn step(&mut self, _step: &mut Step<'_, &'a Value>) -> Result<Flow<()>> {
        Ok(Flow::Continue)
    }
}

fn at(path: &str) -> Address {
    Address::At(Path::parse(path))
}

#[test]
fn test_read_only_handler() {
    let root = service_config();
    let deepest = |path: &str| match walk(&root, &at(path), &mut DeepestExisting).unwrap() {
        Walked::Finished(prefix) => prefix,
        other => panic!("unexpected walk result {other:?}"),
    };
    assert_eq!(deepest("server.port"), "server.port");
    assert_eq!(deepest("server.http.port"), "server");
    assert_eq!(deepest("nothing.here"), "");
    assert_eq!(deepest("name.first"), "name");
}

#[test]
fn test_mutating_handler() {
    let mut root = service_config();
    for n in 1..=3 {
        let walked = walk(&mut root, &at("events.log"), &mut Append(Value::from(n))).unwrap();
        match walked {
            Walked::Taken(slot) => assert_eq!(slot.as_list().map(<[Value]>::len), Some(n as usize)),
            other => panic!("unexpected walk result {other:?}"),
        }
    }
    assert_value_at(&root, "events.log", vec![1, 2, 3]);
}

#[test]
fn test_root_address_skips_handler() {
    let root = service_config();
    let walked = walk(&root, &Address::Root, &mut Wander).unwrap();
    assert!(matches!(walked, Walked::Root(value) if std::ptr::eq(value, &root)));
}

#[test]
fn test_handler_that_never_finishes_fails_loudly() {
    let root = service_config();
    for path in ["server.port", "server.missing"] {
        let err = walk(&root, &at(path), &mut Wander).unwrap_err();
        assert!(
            matches!(err, Error::Access(AccessError::Incomplete { path: ref walked }) if walked == path),
            "unexpected error {err:?}"
        );
    }
}

#[test]
fn test_walk_rejects_leaf_root() {
    let root = Value::from("text");
    let err = walk(&root, &Address::Root, &mut Wander).unwrap_err();
    assert!(matches!(err, Error::Access(AccessError::InvalidRoot { found: "text", .. })));
}
