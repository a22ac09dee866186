pub mod map;
pub mod output;

/// Built-in commands with the one-line description shown by `help`.
pub const BUILTIN_DOCS: [(&str, &str); 6] = [
    ("?", "show this help menu"),
    ("help", "show this help menu"),
    ("exit", "exit the command shell"),
    ("pwd", "print current working directory"),
    ("cd", "change current working directory"),
    ("which", "locate a command the way the shell would run it"),
];

pub fn is_builtin(name: &str) -> bool {
    BUILTIN_DOCS.iter().any(|(builtin, _)| *builtin == name)
}

/// A command run inside the shell process itself.
///
/// `args` excludes the command name. `None` signals failure.
pub trait Builtin {
    fn call(&mut self, args: &[String]) -> Option<i32>;
}
