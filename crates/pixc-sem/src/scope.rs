//! The symbol table: a stack of scopes with a function barrier.
//!
//! Scopes come in three kinds. The global scope sits at the bottom of the
//! stack for the table's whole lifetime; block and function scopes are
//! pushed and popped as the analyser or generator walks the tree. Function
//! scopes are semi-opaque: looking up a *variable* stops at the innermost
//! function scope (whose bindings are the declared parameters), while
//! *functions* are only ever looked up in the global scope, so they stay
//! visible from anywhere.
//!
//! Bindings are insertion-ordered, which makes frame-index assignment
//! deterministic: a scope's next free slot is the sum of the slots already
//! bound in it.

use indexmap::IndexMap;
use pixc_par::Type;

/// Kind of a scope on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Block,
    Function,
}

/// Kind of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

/// A function parameter: name and declared type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

/// A named entity in some scope.
///
/// Variables carry a frame address once the generator assigns one; the
/// address is set exactly once, at declaration, and never changes.
/// Functions carry their parameter list; their `ty` is the return type.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    pub ty: Type,
    pub line: u32,
    pub params: Vec<Param>,
    pub frame_index: Option<usize>,
    pub frame_level: Option<usize>,
    /// `Some(len)` for array variables; arrays occupy `len` frame slots.
    pub array_len: Option<usize>,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, ty: Type, line: u32) -> Self {
        Self {
            kind: SymbolKind::Variable,
            name: name.into(),
            ty,
            line,
            params: Vec::new(),
            frame_index: None,
            frame_level: None,
            array_len: None,
        }
    }

    pub fn array(name: impl Into<String>, ty: Type, len: usize, line: u32) -> Self {
        Self {
            array_len: Some(len),
            ..Self::variable(name, ty, line)
        }
    }

    pub fn function(name: impl Into<String>, ret_type: Type, params: Vec<Param>, line: u32) -> Self {
        Self {
            kind: SymbolKind::Function,
            name: name.into(),
            ty: ret_type,
            line,
            params,
            frame_index: None,
            frame_level: None,
            array_len: None,
        }
    }

    /// Number of frame slots the symbol occupies.
    pub fn slots(&self) -> usize {
        self.array_len.unwrap_or(1)
    }
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    bindings: IndexMap<String, Symbol>,
}

/// The scope stack.
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Creates the table with its permanent global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                kind: ScopeKind::Global,
                bindings: IndexMap::new(),
            }],
        }
    }

    pub fn push_scope(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope {
            kind,
            bindings: IndexMap::new(),
        });
    }

    /// Pops the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Inserts a symbol into the innermost scope.
    ///
    /// Duplicate names are the caller's responsibility; callers query
    /// [`SymbolTable::declared_in_current`] before inserting.
    pub fn add_symbol(&mut self, symbol: Symbol) {
        let scope = self.scopes.last_mut().expect("global scope always exists");
        scope.bindings.insert(symbol.name.clone(), symbol);
    }

    /// Inserts a symbol into the global scope regardless of depth.
    ///
    /// Function declarations live in the global scope even when written
    /// inside a global-level block, which is what keeps them resolvable
    /// from everywhere.
    pub fn add_global_symbol(&mut self, symbol: Symbol) {
        let scope = self.scopes.first_mut().expect("global scope always exists");
        scope.bindings.insert(symbol.name.clone(), symbol);
    }

    /// Whether `name` is bound in the innermost scope.
    pub fn declared_in_current(&self, name: &str) -> bool {
        self.scopes
            .last()
            .map(|s| s.bindings.contains_key(name))
            .unwrap_or(false)
    }

    /// Whether `name` is bound in the global scope.
    pub fn declared_in_global(&self, name: &str) -> bool {
        self.scopes[0].bindings.contains_key(name)
    }

    /// Resolves a name, honouring the function barrier.
    ///
    /// Variable lookups walk the stack innermost-outward and stop after
    /// the innermost function scope: its bindings (the parameters) are
    /// visible, anything beyond it is not. Function lookups go straight
    /// to the global scope.
    pub fn lookup(&self, name: &str, request: SymbolKind) -> Option<&Symbol> {
        match request {
            SymbolKind::Function => self.scopes[0]
                .bindings
                .get(name)
                .filter(|s| s.kind == SymbolKind::Function),
            SymbolKind::Variable => {
                for scope in self.scopes.iter().rev() {
                    if let Some(symbol) = scope.bindings.get(name) {
                        if symbol.kind == SymbolKind::Variable {
                            return Some(symbol);
                        }
                    }
                    if scope.kind == ScopeKind::Function {
                        break;
                    }
                }
                None
            }
        }
    }

    /// Whether `name` resolves to anything from here.
    pub fn is_declared(&self, name: &str) -> bool {
        self.lookup(name, SymbolKind::Variable).is_some()
            || self.lookup(name, SymbolKind::Function).is_some()
    }

    /// Type of a resolvable name (variables shadow functions).
    pub fn get_type(&self, name: &str) -> Option<Type> {
        self.lookup(name, SymbolKind::Variable)
            .or_else(|| self.lookup(name, SymbolKind::Function))
            .map(|s| s.ty)
    }

    /// Parameter list of a function.
    pub fn get_params(&self, name: &str) -> Option<&[Param]> {
        self.lookup(name, SymbolKind::Function)
            .map(|s| s.params.as_slice())
    }

    /// Assigns a variable's frame address. Called once, at declaration.
    pub fn set_location(&mut self, name: &str, frame_index: usize, frame_level: usize) {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(symbol) = scope.bindings.get_mut(name) {
                if symbol.kind == SymbolKind::Variable {
                    symbol.frame_index = Some(frame_index);
                    symbol.frame_level = Some(frame_level);
                    return;
                }
            }
            if scope.kind == ScopeKind::Function {
                return;
            }
        }
    }

    /// Frame level of the innermost scope: the number of enclosing
    /// frame-bearing scopes above the global frame.
    pub fn current_frame_level(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Next free slot in the innermost frame.
    pub fn current_frame_index(&self) -> usize {
        self.scopes
            .last()
            .map(|s| {
                s.bindings
                    .values()
                    .filter(|sym| sym.kind == SymbolKind::Variable)
                    .map(Symbol::slots)
                    .sum()
            })
            .unwrap_or(0)
    }

    pub fn current_scope_kind(&self) -> ScopeKind {
        self.scopes.last().map(|s| s.kind).unwrap_or(ScopeKind::Global)
    }

    pub fn is_function_scope(&self) -> bool {
        self.current_scope_kind() == ScopeKind::Function
    }

    pub fn is_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
