//! End-to-end scenarios from `spec.md` §8, driven against `RecordingDevice`.
//!
//! S1-S4 are covered as unit tests inside `interpreter.rs`; this file covers
//! the two that need a resource dictionary (S5, Form XObject) or a
//! non-default page setup (S6, rotated page) to set up.

use pdf_content_interp::{
    DefaultResourceManager, Device, Interpreter, InterpreterConfig, Matrix, Object, Page,
    PathSegment, Rect, RecordingDevice, ResourceManagerConfig,
};
use rustc_hash::FxHashMap;

fn num_array(values: &[f64]) -> Object {
    Object::Array(values.iter().map(|v| Box::new(Object::Number(*v))).collect())
}

#[test]
fn s5_form_xobject_ctm_composition() {
    let mut xobj_dict = FxHashMap::default();
    xobj_dict.insert("Subtype".to_string(), Object::Name("Form".to_string()));
    xobj_dict.insert("BBox".to_string(), num_array(&[0.0, 0.0, 100.0, 100.0]));
    xobj_dict.insert(
        "Matrix".to_string(),
        num_array(&[2.0, 0.0, 0.0, 2.0, 10.0, 20.0]),
    );

    let form = Object::Stream {
        dict: xobj_dict,
        data: b"1 1 m 2 2 l S".to_vec(),
    };

    let mut xobject_res = FxHashMap::default();
    xobject_res.insert("X1".to_string(), form);
    let mut resources = FxHashMap::default();
    resources.insert("XObject".to_string(), Object::Dictionary(xobject_res));

    let page = Page {
        index: 0,
        mediabox: Rect { x0: 0.0, y0: 0.0, x1: 612.0, y1: 792.0 },
        rotate: 0,
        resources,
        contents: vec![b"/X1 Do".to_vec()],
    };

    let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
    let mut device = RecordingDevice::default();
    Interpreter::process_page(&page, &mut device, &rm, InterpreterConfig::default()).unwrap();

    assert_eq!(device.figures.len(), 1);
    let (name, bbox, matrix) = &device.figures[0];
    assert_eq!(name, "X1");
    assert_eq!(*bbox, Rect { x0: 0.0, y0: 0.0, x1: 100.0, y1: 100.0 });
    assert_eq!(*matrix, Matrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 20.0));

    let parent_ctm = Matrix::new(1.0, 0.0, 0.0, 1.0, -0.0, -0.0);
    let expected_child_ctm = matrix.mult(&parent_ctm);
    assert!(device.ctm_history.contains(&expected_child_ctm));

    assert_eq!(device.paths.len(), 1);
    let (stroke, fill, _evenodd, path) = &device.paths[0];
    assert!(*stroke);
    assert!(!*fill);
    assert_eq!(
        path.as_slice(),
        &[PathSegment::Move(1.0, 1.0), PathSegment::Line(2.0, 2.0)]
    );
}

#[test]
fn s6_rotate_90_page() {
    let page = Page {
        index: 0,
        mediabox: Rect { x0: 0.0, y0: 0.0, x1: 612.0, y1: 792.0 },
        rotate: 90,
        resources: FxHashMap::default(),
        contents: vec![b"".to_vec()],
    };

    let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
    let mut device = RecordingDevice::default();
    Interpreter::process_page(&page, &mut device, &rm, InterpreterConfig::default()).unwrap();

    let expected = Matrix::new(0.0, -1.0, 1.0, 0.0, 0.0, 612.0);
    assert_eq!(device.pages.len(), 1);
    assert_eq!(device.pages[0].1, expected);
}
