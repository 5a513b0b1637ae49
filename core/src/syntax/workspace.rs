use smallvec::SmallVec;

use super::{
    DeclaredParameter, DefId, Definition, Expr, ExprId, Import, Module, ModuleId, ParamId,
    Statement,
};

/// Arena owning every node of a calculation.
///
/// Modules are stored in load order, so `ModuleId::index` doubles as the
/// load position. The tree is immutable once linked; the only mutation the
/// rest of the crate performs after lowering is appending synthetic imports
/// during context merging.
#[derive(Debug, Default)]
pub struct Workspace {
    modules: Vec<Module>,
    defs: Vec<Definition>,
    params: Vec<DeclaredParameter>,
    exprs: Vec<Expr>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_module(&mut self, name: String) -> ModuleId {
        let id = ModuleId::new(self.modules.len());
        self.modules.push(Module {
            name,
            imports: Vec::new(),
            statements: Vec::new(),
        });
        id
    }

    /// Register a definition header. The body starts out unset and is filled
    /// in by the linker once all headers are known.
    pub fn alloc_definition(&mut self, name: String) -> DefId {
        let id = DefId::new(self.defs.len());
        self.defs.push(Definition {
            name,
            params: SmallVec::new(),
            body: ExprId::INVALID,
        });
        id
    }

    pub fn alloc_parameter(&mut self, name: String, owner: DefId) -> ParamId {
        let id = ParamId::new(self.params.len());
        self.params.push(DeclaredParameter { name, owner });
        id
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len());
        self.exprs.push(expr);
        id
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    pub fn definition(&self, id: DefId) -> &Definition {
        &self.defs[id.index()]
    }

    pub fn param(&self, id: ParamId) -> &DeclaredParameter {
        &self.params[id.index()]
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        debug_assert!(id.is_valid(), "expression id used before lowering");
        &self.exprs[id.index()]
    }

    /// Module ids in load order.
    pub fn modules(&self) -> impl Iterator<Item = ModuleId> + '_ {
        (0..self.modules.len()).map(ModuleId::new)
    }

    /// The definitions declared by a module, in statement order.
    pub fn definitions(&self, module: ModuleId) -> impl Iterator<Item = DefId> + '_ {
        self.module(module)
            .statements
            .iter()
            .filter_map(|stmt| match stmt {
                Statement::Definition(def) => Some(*def),
                Statement::Evaluation(_) => None,
            })
    }

    pub fn add_import(&mut self, module: ModuleId, import: Import) {
        self.modules[module.index()].imports.push(import);
    }

    pub(crate) fn push_statement(&mut self, module: ModuleId, statement: Statement) {
        self.modules[module.index()].statements.push(statement);
    }

    pub(crate) fn set_def_params(&mut self, def: DefId, params: SmallVec<[ParamId; 4]>) {
        self.defs[def.index()].params = params;
    }

    pub(crate) fn set_def_body(&mut self, def: DefId, body: ExprId) {
        self.defs[def.index()].body = body;
    }
}
