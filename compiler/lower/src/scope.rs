use std::collections::BTreeMap;

/// A stack of lexical scopes, innermost last. Each scope maps the names bound
/// in it to some information about the binding.
#[derive(Debug, Clone)]
pub struct Scopes<T>(Vec<BTreeMap<String, T>>);

impl<T> Default for Scopes<T> {
    fn default() -> Self {
        Scopes(Vec::new())
    }
}

impl<T> Scopes<T> {
    pub fn push_scope(&mut self, scope: BTreeMap<String, T>) {
        self.0.push(scope);
    }

    pub fn pop_scope(&mut self) -> BTreeMap<String, T> {
        self.0.pop().unwrap()
    }

    /// Find the innermost binding of `name`.
    pub fn resolve(&self, name: &str) -> Option<&T> {
        self.0.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}

impl Scopes<()> {
    /// Push a scope binding each of `names`.
    pub fn push_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.push_scope(names.into_iter().map(|name| (name.to_string(), ())).collect());
    }
}
