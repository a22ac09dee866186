use super::Builtin;
use crate::process::cd::Cd;
use crate::process::exit::Exit;
use crate::process::help::Help;
use crate::process::pwd::Pwd;
use crate::process::which::Which;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub struct BuiltinMap {
    cd: Rc<RefCell<Cd>>,
    exit: Rc<RefCell<Exit>>,
    help: Rc<RefCell<Help>>,
    pwd: Rc<RefCell<Pwd>>,
    which: Rc<RefCell<Which>>,
    func_map: HashMap<String, Rc<RefCell<dyn Builtin>>>,
}

impl BuiltinMap {
    pub fn new() -> Self {
        let mut builtin = BuiltinMap {
            cd: Rc::new(RefCell::new(Cd::new())),
            exit: Rc::new(RefCell::new(Exit::new())),
            help: Rc::new(RefCell::new(Help::new())),
            pwd: Rc::new(RefCell::new(Pwd::new())),
            which: Rc::new(RefCell::new(Which::new())),
            func_map: HashMap::new(),
        };

        builtin.populate_func_map();
        builtin
    }

    fn populate_func_map(&mut self) {
        self.add("?", self.help.clone());
        self.add("help", self.help.clone());
        self.add("exit", self.exit.clone());
        self.add("pwd", self.pwd.clone());
        self.add("cd", self.cd.clone());
        self.add("which", self.which.clone());
    }

    pub fn add(&mut self, func_name: &str, func_ptr: Rc<RefCell<dyn Builtin>>) {
        self.func_map.insert(func_name.to_string(), func_ptr);
    }

    pub fn contains(&self, func_name: &str) -> bool {
        self.func_map.contains_key(func_name)
    }

    /// Run the named builtin; `None` when no builtin has that name.
    pub fn invoke(&self, func_name: &str, args: &[String]) -> Option<Option<i32>> {
        self.func_map
            .get(func_name)
            .map(|builtin| builtin.borrow_mut().call(args))
    }

    /// Status requested by `exit`, if it has run.
    pub fn exit_requested(&self) -> Option<i32> {
        self.exit.borrow().requested()
    }

    pub fn cd(&self) -> Rc<RefCell<Cd>> {
        self.cd.clone()
    }

    pub fn help(&self) -> Rc<RefCell<Help>> {
        self.help.clone()
    }

    pub fn pwd(&self) -> Rc<RefCell<Pwd>> {
        self.pwd.clone()
    }

    pub fn which(&self) -> Rc<RefCell<Which>> {
        self.which.clone()
    }
}

impl Default for BuiltinMap {
    fn default() -> Self {
        Self::new()
    }
}
