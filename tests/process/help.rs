use crate::common::{buffer_to_string, capture_buffer};
use osmium::process::builtin::map::BuiltinMap;
use osmium::process::builtin::BUILTIN_DOCS;

#[test]
fn help_lists_every_builtin_with_its_description() {
    let map = BuiltinMap::new();
    let buffer = capture_buffer();
    map.help().borrow_mut().capture_output_buffer(buffer.clone());

    assert_eq!(map.invoke("?", &[]), Some(Some(0)));

    let output = buffer_to_string(&buffer);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), BUILTIN_DOCS.len());
    assert!(lines.contains(&"cd - change current working directory"));
    assert!(lines.contains(&"exit - exit the command shell"));
}

#[test]
fn help_is_reachable_by_name_too() {
    let map = BuiltinMap::new();
    let buffer = capture_buffer();
    map.help().borrow_mut().capture_output_buffer(buffer.clone());

    assert_eq!(map.invoke("help", &[]), Some(Some(0)));
    assert!(buffer_to_string(&buffer).starts_with("? - show this help menu"));
}
