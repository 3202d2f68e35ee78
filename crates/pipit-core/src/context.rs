//! Execution contexts and variable scopes

use crate::external::{DirStore, LineEditor, ScriptSourcer};
use crate::port::Port;
use crate::value::Value;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Port role indices.
pub const INPUT: usize = 0;
pub const OUTPUT: usize = 1;
pub const AUX: usize = 2;

const MIN_PORTS: usize = 3;

#[derive(Default)]
struct Scope {
    vars: RwLock<HashMap<String, Value>>,
    parent: Option<Env>,
}

/// A chain of variable scopes. Cloning shares the same scope.
#[derive(Clone, Default)]
pub struct Env(Arc<Scope>);

impl Env {
    pub fn new() -> Self {
        Env::default()
    }

    /// A new innermost scope whose lookups fall back to `self`.
    pub fn child(&self) -> Env {
        Env(Arc::new(Scope {
            vars: RwLock::new(HashMap::new()),
            parent: Some(self.clone()),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        let mut scope = Some(self);
        while let Some(env) = scope {
            if let Some(value) = env.0.vars.read().get(name) {
                return Some(value.clone());
            }
            scope = env.0.parent.as_ref();
        }
        None
    }

    /// Bind `name` in this scope, shadowing any outer binding.
    pub fn set(&self, name: &str, value: Value) {
        self.0.vars.write().insert(name.to_string(), value);
    }
}

/// Everything an operation runs with: ports, environment and the optional
/// external collaborators.
///
/// Store, editor and sourcer are shared by reference with every fork, so
/// their implementations must synchronize internally.
pub struct Context {
    name: String,
    ports: Vec<Port>,
    pub env: Env,
    pub store: Option<Arc<dyn DirStore>>,
    pub editor: Option<Arc<dyn LineEditor>>,
    pub sourcer: Option<Arc<dyn ScriptSourcer>>,
}

impl Context {
    /// Missing ports up to input, output and auxiliary are filled with
    /// closed ports.
    pub fn new(name: impl Into<String>, mut ports: Vec<Port>) -> Self {
        if ports.len() < MIN_PORTS {
            ports.resize_with(MIN_PORTS, Port::closed);
        }
        Context {
            name: name.into(),
            ports,
            env: Env::new(),
            store: None,
            editor: None,
            sourcer: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn DirStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_editor(mut self, editor: Arc<dyn LineEditor>) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn with_sourcer(mut self, sourcer: Arc<dyn ScriptSourcer>) -> Self {
        self.sourcer = Some(sourcer);
        self
    }

    pub fn with_env(mut self, env: Env) -> Self {
        self.env = env;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn port(&self, index: usize) -> Option<&Port> {
        self.ports.get(index)
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn input(&self) -> &Port {
        &self.ports[INPUT]
    }

    pub fn output(&self) -> &Port {
        &self.ports[OUTPUT]
    }

    pub fn aux(&self) -> &Port {
        &self.ports[AUX]
    }

    /// Rebind port `index`, growing the port array with closed ports if
    /// needed. The replaced port's handles are dropped.
    pub fn set_port(&mut self, index: usize, port: Port) {
        if index >= self.ports.len() {
            self.ports.resize_with(index + 1, Port::closed);
        }
        self.ports[index] = port;
    }

    /// Derive a context for an isolated sub-invocation. Port handles are
    /// cloned, variables go into a fresh child scope, collaborators are
    /// shared. The forker owns the result and must close its ports.
    pub fn fork(&self, name: impl Into<String>) -> Context {
        let name = name.into();
        tracing::debug!(parent = %self.name, child = %name, "forking context");
        Context {
            name,
            ports: self.ports.clone(),
            env: self.env.child(),
            store: self.store.clone(),
            editor: self.editor.clone(),
            sourcer: self.sourcer.clone(),
        }
    }

    /// Drop this context's port handles. Shared conduits stay open while
    /// other holders keep theirs.
    pub fn close_ports(&mut self) {
        tracing::trace!(context = %self.name, "closing ports");
        for port in &mut self.ports {
            port.close();
        }
    }
}
