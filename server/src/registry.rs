use std::{collections::HashMap, error::Error as StdError, sync::Arc};

use thiserror::Error;

use jsonrpc_parts_types::{Fault, Params, Value};

/// The error channel out of a registered method.
///
/// A `Fault` is an application-level error forwarded to the caller with its
/// own code/message/data intact; anything else is downgraded to an
/// InternalError by the dispatcher and never propagates further.
#[derive(Debug, Error)]
pub enum MethodError {
    /// An explicit protocol fault raised by the method.
    #[error(transparent)]
    Fault(Fault),
    /// Any other failure during invocation.
    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl From<Fault> for MethodError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

impl From<String> for MethodError {
    fn from(message: String) -> Self {
        Self::Other(message.into())
    }
}

impl From<&str> for MethodError {
    fn from(message: &str) -> Self {
        Self::Other(message.into())
    }
}

/// A callable registered under a method name.
///
/// The dispatcher hands the method whatever parameters the request carried:
/// a positional array, a named map, or nothing. [`Params::parse`] converts
/// them into concrete argument types.
pub trait Method: Send + Sync {
    /// Invokes the method.
    fn call(&self, params: Option<Params>) -> Result<Value, MethodError>;
}

impl<F> Method for F
where
    F: Fn(Option<Params>) -> Result<Value, MethodError> + Send + Sync,
{
    fn call(&self, params: Option<Params>) -> Result<Value, MethodError> {
        self(params)
    }
}

/// A name-to-method mapping with registration helpers.
///
/// Registration is expected at setup time; once it is complete the registry
/// is safe to read concurrently during dispatch.
#[derive(Clone, Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Arc<dyn Method>>,
}

impl MethodRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function or closure under `name`. The last registration
    /// for a name wins.
    pub fn register<F>(&mut self, name: impl Into<String>, method: F)
    where
        F: Fn(Option<Params>) -> Result<Value, MethodError> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
    }

    /// Registers an already-boxed [`Method`] under `name`.
    pub fn register_method(&mut self, name: impl Into<String>, method: Arc<dyn Method>) {
        self.methods.insert(name.into(), method);
    }

    /// Registers a whole set of `(name, method)` pairs at once.
    ///
    /// This is the explicit replacement for registering "all public methods
    /// of an object": the caller builds the list.
    pub fn register_all<I>(&mut self, methods: I)
    where
        I: IntoIterator<Item = (String, Arc<dyn Method>)>,
    {
        self.methods.extend(methods);
    }

    /// Removes the method registered under `name`, returning whether one
    /// was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.methods.remove(name).is_some()
    }

    /// Whether a method is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Looks up the method registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Method>> {
        self.methods.get(name)
    }

    /// The registered method names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl std::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodRegistry").field("methods", &self.methods.len()).finish()
    }
}
