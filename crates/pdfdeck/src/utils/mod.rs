//! Small helpers shared across modules: ordered moves, object copying and
//! size formatting.

use std::collections::BTreeSet;

use lopdf::{Document, Object, ObjectId};

/// Move the element at `from` so that it ends up at `to`.
///
/// Intermediate elements shift by one. Returns false and leaves `items`
/// untouched when either index is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }

    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Copy objects referenced by `obj` from `source` into `target`.
///
/// Walks the structure recursively and inserts every referenced object that
/// `target` does not hold yet. References to ids in `stop` are neither
/// followed nor copied. Ids must already be disjoint (renumber the source
/// first). Returns the ids inserted, in visiting order.
pub fn copy_references(
    target: &mut Document,
    source: &Document,
    obj: &Object,
    stop: &BTreeSet<ObjectId>,
) -> Vec<ObjectId> {
    let mut copied = Vec::new();
    copy_into(target, source, obj, stop, &mut copied);
    copied
}

fn copy_into(
    target: &mut Document,
    source: &Document,
    obj: &Object,
    stop: &BTreeSet<ObjectId>,
    copied: &mut Vec<ObjectId>,
) {
    match obj {
        Object::Reference(ref_id) => {
            if !stop.contains(ref_id)
                && !target.objects.contains_key(ref_id)
                && let Ok(referenced_obj) = source.get_object(*ref_id)
            {
                target.objects.insert(*ref_id, referenced_obj.clone());
                copied.push(*ref_id);
                copy_into(target, source, referenced_obj, stop, copied);
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter() {
                copy_into(target, source, value, stop, copied);
            }
        }
        Object::Array(arr) => {
            for item in arr {
                copy_into(target, source, item, stop, copied);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter() {
                copy_into(target, source, value, stop, copied);
            }
        }
        _ => {}
    }
}

/// Replace every reference in `obj` for which `rewrite` returns a value.
pub fn rewrite_references(obj: &mut Object, rewrite: &dyn Fn(ObjectId) -> Option<Object>) {
    match obj {
        Object::Reference(ref_id) => {
            if let Some(replacement) = rewrite(*ref_id) {
                *obj = replacement;
            }
        }
        Object::Dictionary(dict) => {
            for (_, value) in dict.iter_mut() {
                rewrite_references(value, rewrite);
            }
        }
        Object::Array(arr) => {
            for item in arr.iter_mut() {
                rewrite_references(item, rewrite);
            }
        }
        Object::Stream(stream) => {
            for (_, value) in stream.dict.iter_mut() {
                rewrite_references(value, rewrite);
            }
        }
        _ => {}
    }
}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
