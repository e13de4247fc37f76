use std::path::Path;

use serde_json::Value;

use crate::error::{MergeError, Result};

pub const OBJECTS: &str = "objects";
pub const OBJDATA: &str = "objdata";
pub const LOC_STRING_VALUES: &str = "LocStringValues";

/// Borrows `objects[0].objdata.LocStringValues` of a string table document.
///
/// `path` is only used to label the error.
pub fn loc_string_values<'a>(doc: &'a Value, path: &Path) -> Result<&'a Vec<Value>> {
    let objects = doc
        .get(OBJECTS)
        .and_then(|v| v.as_array())
        .ok_or_else(|| MergeError::structure(path, OBJECTS))?;

    let first = objects
        .first()
        .ok_or_else(|| MergeError::structure(path, format!("{OBJECTS}[0]")))?;

    let objdata = first
        .get(OBJDATA)
        .filter(|v| v.is_object())
        .ok_or_else(|| MergeError::structure(path, OBJDATA))?;

    objdata
        .get(LOC_STRING_VALUES)
        .and_then(|v| v.as_array())
        .ok_or_else(|| MergeError::structure(path, LOC_STRING_VALUES))
}

pub fn loc_string_values_mut<'a>(doc: &'a mut Value, path: &Path) -> Result<&'a mut Vec<Value>> {
    let objects = doc
        .get_mut(OBJECTS)
        .and_then(|v| v.as_array_mut())
        .ok_or_else(|| MergeError::structure(path, OBJECTS))?;

    let first = objects
        .first_mut()
        .ok_or_else(|| MergeError::structure(path, format!("{OBJECTS}[0]")))?;

    let objdata = first
        .get_mut(OBJDATA)
        .filter(|v| v.is_object())
        .ok_or_else(|| MergeError::structure(path, OBJDATA))?;

    objdata
        .get_mut(LOC_STRING_VALUES)
        .and_then(|v| v.as_array_mut())
        .ok_or_else(|| MergeError::structure(path, LOC_STRING_VALUES))
}

/// Swaps the flat-pair sequence of `doc`, leaving every other field untouched.
pub fn replace_loc_string_values(doc: &mut Value, path: &Path, values: Vec<Value>) -> Result<()> {
    let slot = loc_string_values_mut(doc, path)?;
    *slot = values;
    Ok(())
}
