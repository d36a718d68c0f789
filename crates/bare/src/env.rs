//! Environment integration
//!
//! [`Environment`] stands in for the process-wide host: the library info
//! record, the global alias table and the per-type prototype table. All
//! mutation needs `&mut Environment`, which is what serializes it.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use bare_dom::{Document, DomError, DomResult, NodeData, NodeId};
use serde::Serialize;

use crate::class_list;
use crate::config::Options;
use crate::select::{self, QueryAllFn, QuerySingleFn};
use crate::{BareError, BareResult};

/// Library info record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    version: String,
    shortcut_enabled: bool,
    prototypes_enabled: bool,
    runtime_version: Option<f64>,
}

impl Info {
    fn new() -> Self {
        Self {
            version: crate::VERSION.to_string(),
            shortcut_enabled: false,
            prototypes_enabled: false,
            runtime_version: None,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn shortcut_enabled(&self) -> bool {
        self.shortcut_enabled
    }

    pub fn prototypes_enabled(&self) -> bool {
        self.prototypes_enabled
    }

    /// Memoized runtime version, `None` until first probed
    pub fn runtime_version(&self) -> Option<f64> {
        self.runtime_version
    }
}

/// Value bound to a global name
#[derive(Debug, Clone, PartialEq)]
pub enum Global {
    QuerySingle(QuerySingleFn),
    QueryAll(QueryAllFn),
    /// Owned by something other than this library
    Foreign(String),
}

/// Node kind a prototype belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TypeTag {
    Document,
    Element,
    Text,
    Comment,
}

impl TypeTag {
    /// Tag of a node, `None` if it does not exist
    pub fn of(doc: &Document, node: NodeId) -> Option<Self> {
        Some(match doc.tree().get(node)?.data {
            NodeData::Document => TypeTag::Document,
            NodeData::Element(_) => TypeTag::Element,
            NodeData::Text(_) => TypeTag::Text,
            NodeData::Comment(_) => TypeTag::Comment,
        })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Document => "Document",
            TypeTag::Element => "Element",
            TypeTag::Text => "Text",
            TypeTag::Comment => "Comment",
        };
        f.write_str(name)
    }
}

/// Instance method installed on a type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementMethod {
    /// Changes the node's classes; the flag is the toggle `force`
    Mutate(fn(&mut Document, NodeId, &str, bool) -> DomResult<()>),
    /// Reads the node's classes
    Query(fn(&Document, NodeId, &str) -> DomResult<bool>),
}

/// Capability table: type tag -> method name -> implementation
#[derive(Debug, Clone, Default)]
pub struct PrototypeTable {
    types: HashMap<TypeTag, BTreeMap<&'static str, ElementMethod>>,
}

impl PrototypeTable {
    /// Install or overwrite a method
    pub fn install(&mut self, tag: TypeTag, name: &'static str, method: ElementMethod) {
        self.types.entry(tag).or_default().insert(name, method);
    }

    pub fn lookup(&self, tag: TypeTag, name: &str) -> Option<ElementMethod> {
        self.types.get(&tag)?.get(name).copied()
    }

    /// Installed method names for a type, sorted
    pub fn methods(&self, tag: TypeTag) -> Vec<&'static str> {
        self.types
            .get(&tag)
            .map(|methods| methods.keys().copied().collect())
            .unwrap_or_default()
    }
}

fn add_class_method(doc: &mut Document, element: NodeId, name: &str, _force: bool) -> DomResult<()> {
    class_list::add_class(doc, name, element)
}

fn remove_class_method(doc: &mut Document, element: NodeId, name: &str, _force: bool) -> DomResult<()> {
    class_list::remove_class(doc, name, element)
}

fn toggle_class_method(doc: &mut Document, element: NodeId, name: &str, force: bool) -> DomResult<()> {
    class_list::toggle_class(doc, name, element, force)
}

fn has_class_method(doc: &Document, element: NodeId, name: &str) -> DomResult<bool> {
    class_list::has_class(doc, name, element).map(|result| result.any())
}

/// Host environment the opt-in integrations write into
#[derive(Debug, Clone)]
pub struct Environment {
    options: Options,
    info: Info,
    globals: HashMap<String, Global>,
    prototypes: PrototypeTable,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            info: Info::new(),
            globals: HashMap::new(),
            prototypes: PrototypeTable::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn prototypes(&self) -> &PrototypeTable {
        &self.prototypes
    }

    pub fn global(&self, name: &str) -> Option<&Global> {
        self.globals.get(name)
    }

    /// Bind a global directly, returning the previous binding
    pub fn define_global(&mut self, name: &str, value: Global) -> Option<Global> {
        self.globals.insert(name.to_string(), value)
    }

    pub fn remove_global(&mut self, name: &str) -> Option<Global> {
        self.globals.remove(name)
    }

    /// Whether both aliases point at exactly this library's query functions
    pub fn shortcut_bound(&self) -> bool {
        let single = match self.global(&self.options.single_alias) {
            Some(Global::QuerySingle(f)) => {
                std::ptr::fn_addr_eq(*f, select::query_single as QuerySingleFn)
            }
            _ => false,
        };
        let all = match self.global(&self.options.all_alias) {
            Some(Global::QueryAll(f)) => std::ptr::fn_addr_eq(*f, select::query_all as QueryAllFn),
            _ => false,
        };
        single && all
    }

    /// Bind the single/all aliases unless the single alias is taken.
    ///
    /// `force` overwrites existing bindings. Returns the read-back state.
    pub fn enable_global_shortcut(&mut self, force: bool) -> bool {
        let single_alias = self.options.single_alias.clone();
        let all_alias = self.options.all_alias.clone();

        if force || self.global(&single_alias).is_none() {
            self.define_global(&single_alias, Global::QuerySingle(select::query_single));
            self.define_global(&all_alias, Global::QueryAll(select::query_all));
            tracing::info!(single = %single_alias, all = %all_alias, force, "Global shortcut bound");
        } else if !self.shortcut_bound() {
            tracing::warn!("Global `{}` is already defined, shortcut left untouched", single_alias);
        }

        self.info.shortcut_enabled = self.shortcut_bound();
        self.info.shortcut_enabled
    }

    /// Function bound to the single alias, if it is ours
    pub fn shortcut_single(&self) -> Option<QuerySingleFn> {
        match self.global(&self.options.single_alias)? {
            Global::QuerySingle(f) => Some(*f),
            _ => None,
        }
    }

    /// Function bound to the all alias, if it is ours
    pub fn shortcut_all(&self) -> Option<QueryAllFn> {
        match self.global(&self.options.all_alias)? {
            Global::QueryAll(f) => Some(*f),
            _ => None,
        }
    }

    /// Install the class-list methods on the element prototype
    pub fn enable_prototype_extensions(&mut self) -> bool {
        let table = &mut self.prototypes;
        table.install(TypeTag::Element, "addClass", ElementMethod::Mutate(add_class_method));
        table.install(TypeTag::Element, "removeClass", ElementMethod::Mutate(remove_class_method));
        table.install(TypeTag::Element, "toggleClass", ElementMethod::Mutate(toggle_class_method));
        table.install(TypeTag::Element, "hasClass", ElementMethod::Query(has_class_method));

        tracing::info!("Prototype extensions installed on {}", TypeTag::Element);
        self.info.prototypes_enabled = true;
        true
    }

    /// Host runtime version, computed once and memoized in [`Info`]
    pub fn runtime_version(&mut self) -> f64 {
        *self
            .info
            .runtime_version
            .get_or_insert(self.options.runtime_version)
    }

    /// Method-call view of a node through the prototype table
    pub fn element<'e, 'd>(&'e self, doc: &'d mut Document, node: NodeId) -> Extended<'e, 'd> {
        Extended { env: self, doc, node }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Node handle whose methods dispatch through a [`PrototypeTable`]
pub struct Extended<'e, 'd> {
    env: &'e Environment,
    doc: &'d mut Document,
    node: NodeId,
}

impl Extended<'_, '_> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn method(&self, name: &str) -> BareResult<ElementMethod> {
        let tag = TypeTag::of(self.doc, self.node).ok_or(DomError::NotFound(self.node))?;
        self.env
            .prototypes
            .lookup(tag, name)
            .ok_or_else(|| BareError::NotInstalled { type_tag: tag, method: name.to_string() })
    }

    fn not_installed(&self, name: &str) -> BareError {
        match TypeTag::of(self.doc, self.node) {
            Some(type_tag) => BareError::NotInstalled { type_tag, method: name.to_string() },
            None => BareError::Dom(DomError::NotFound(self.node)),
        }
    }

    /// Call an installed method; queries yield `Some(bool)`
    pub fn invoke(&mut self, method: &str, class: &str, force: bool) -> BareResult<Option<bool>> {
        match self.method(method)? {
            ElementMethod::Mutate(f) => {
                f(self.doc, self.node, class, force)?;
                Ok(None)
            }
            ElementMethod::Query(f) => Ok(Some(f(self.doc, self.node, class)?)),
        }
    }

    pub fn add_class(&mut self, class: &str) -> BareResult<()> {
        self.invoke("addClass", class, false).map(drop)
    }

    pub fn remove_class(&mut self, class: &str) -> BareResult<()> {
        self.invoke("removeClass", class, false).map(drop)
    }

    pub fn toggle_class(&mut self, class: &str, force: bool) -> BareResult<()> {
        self.invoke("toggleClass", class, force).map(drop)
    }

    /// Fails with `NotInstalled` unless `hasClass` is bound to a query
    pub fn has_class(&mut self, class: &str) -> BareResult<bool> {
        match self.invoke("hasClass", class, false)? {
            Some(present) => Ok(present),
            None => Err(self.not_installed("hasClass")),
        }
    }
}
