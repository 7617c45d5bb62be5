//! The semantic analyser.
//!
//! A tree walk that infers the type of every expression and enforces the
//! scope rules through the symbol table. Statements type-check their
//! children; expressions return their inferred type. The walk fails fast
//! on the first violation with a `SemanticError` carrying the offending
//! line.

use pixc_par::ast::*;
use pixc_par::Type;
use pixc_util::{SemResult, SemanticError};

use crate::scope::{Param, ScopeKind, Symbol, SymbolKind, SymbolTable};

/// Type checker and scope validator.
pub struct SemanticAnalyzer {
    table: SymbolTable,
    current_function: Option<String>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            current_function: None,
        }
    }

    /// Checks a whole program.
    pub fn analyze(&mut self, program: &Program) -> SemResult<()> {
        for statement in &program.statements {
            self.check_statement(statement)?;
        }
        Ok(())
    }

    fn error(line: u32, message: impl Into<String>) -> SemanticError {
        SemanticError {
            line,
            message: message.into(),
        }
    }

    fn check_statement(&mut self, statement: &Stmt) -> SemResult<()> {
        match statement {
            Stmt::VarDec(dec) => self.check_var_dec(dec),
            Stmt::ArrayDec(dec) => self.check_array_dec(dec),
            Stmt::Assign(assign) => self.check_assign(assign).map(|_| ()),
            Stmt::Print(print) => {
                // Every scalar type prints.
                self.check_expression(&print.expr)?;
                Ok(())
            }
            Stmt::Delay(delay) => {
                let ty = self.check_expression(&delay.expr)?;
                if !ty.is_numeric() {
                    return Err(Self::error(
                        delay.line,
                        format!("__delay expects int or float, got {ty}"),
                    ));
                }
                Ok(())
            }
            Stmt::Write(write) => self.check_write(write),
            Stmt::WriteBox(wbox) => self.check_write_box(wbox),
            Stmt::If(node) => self.check_if(node),
            Stmt::While(node) => self.check_while(node),
            Stmt::For(node) => self.check_for(node),
            Stmt::Return(ret) => self.check_return(ret),
            Stmt::Fun(fun) => self.check_function(fun),
            Stmt::Block(block) => self.check_block(block),
        }
    }

    fn check_block(&mut self, block: &Block) -> SemResult<()> {
        self.table.push_scope(ScopeKind::Block);
        for statement in &block.statements {
            self.check_statement(statement)?;
        }
        self.table.pop_scope();
        Ok(())
    }

    /// Duplicate-name and parameter-clash checks shared by declarations.
    fn check_declarable(&self, name: &str, line: u32) -> SemResult<()> {
        if let Some(function) = &self.current_function {
            let clashes = self
                .table
                .get_params(function)
                .map_or(false, |params| params.iter().any(|p| p.name == name));
            if clashes {
                return Err(Self::error(
                    line,
                    format!("variable `{name}` clashes with a parameter name"),
                ));
            }
        }
        if self.table.declared_in_current(name) {
            return Err(Self::error(
                line,
                format!("identifier `{name}` already declared in this scope"),
            ));
        }
        Ok(())
    }

    fn check_var_dec(&mut self, dec: &VarDec) -> SemResult<()> {
        let init_ty = self.check_expression(&dec.init)?;
        self.check_declarable(&dec.name, dec.line)?;
        if dec.ty != init_ty {
            return Err(Self::error(
                dec.line,
                format!(
                    "type mismatch in declaration of `{}`: expected {}, got {}",
                    dec.name, dec.ty, init_ty
                ),
            ));
        }
        self.table
            .add_symbol(Symbol::variable(&dec.name, dec.ty, dec.line));
        Ok(())
    }

    fn check_array_dec(&mut self, dec: &ArrayDec) -> SemResult<()> {
        self.check_declarable(&dec.name, dec.line)?;

        if let Some(len) = dec.len {
            if len != dec.elements.len() {
                return Err(Self::error(
                    dec.line,
                    format!(
                        "array `{}` declares {} elements but initialises {}",
                        dec.name,
                        len,
                        dec.elements.len()
                    ),
                ));
            }
        }

        for element in &dec.elements {
            let element_ty = self.check_expression(element)?;
            if element_ty != dec.ty {
                return Err(Self::error(
                    element.line(),
                    format!(
                        "type mismatch in array `{}`: expected {}, got {}",
                        dec.name, dec.ty, element_ty
                    ),
                ));
            }
        }

        self.table.add_symbol(Symbol::array(
            &dec.name,
            dec.ty,
            dec.elements.len(),
            dec.line,
        ));
        Ok(())
    }

    fn check_assign(&mut self, assign: &Assign) -> SemResult<Type> {
        let symbol = self
            .table
            .lookup(&assign.target, SymbolKind::Variable)
            .ok_or_else(|| {
                Self::error(
                    assign.line,
                    format!("undeclared identifier `{}`", assign.target),
                )
            })?;
        let target_ty = symbol.ty;
        let array_len = symbol.array_len;

        self.check_indexing(&assign.target, assign.index.as_ref(), array_len, assign.line)?;

        let value_ty = self.check_expression(&assign.value)?;
        if value_ty != target_ty {
            return Err(Self::error(
                assign.line,
                format!(
                    "type mismatch in assignment to `{}`: expected {}, got {}",
                    assign.target, target_ty, value_ty
                ),
            ));
        }
        Ok(target_ty)
    }

    /// Validates the index (or its absence) against the symbol's shape.
    ///
    /// PixIR frame addresses are immediates, so subscripts must be integer
    /// literals and are bounds-checked here, at compile time.
    fn check_indexing(
        &self,
        name: &str,
        index: Option<&Expr>,
        array_len: Option<usize>,
        line: u32,
    ) -> SemResult<()> {
        match (index, array_len) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(Self::error(line, format!("array `{name}` needs an index"))),
            (Some(_), None) => Err(Self::error(line, format!("`{name}` is not an array"))),
            (Some(expr), Some(len)) => match expr {
                Expr::Literal(Literal {
                    value: LiteralValue::Int(k),
                    ..
                }) => {
                    if *k < 0 || *k as usize >= len {
                        Err(Self::error(
                            expr.line(),
                            format!("index {k} is out of bounds for `{name}` (length {len})"),
                        ))
                    } else {
                        Ok(())
                    }
                }
                _ => Err(Self::error(
                    expr.line(),
                    format!("index into `{name}` must be an integer literal"),
                )),
            },
        }
    }

    fn check_write(&mut self, write: &Write) -> SemResult<()> {
        for (expr, what) in [(&write.x, "x"), (&write.y, "y")] {
            let ty = self.check_expression(expr)?;
            if ty != Type::Int {
                return Err(Self::error(
                    write.line,
                    format!("__write expects int for {what}, got {ty}"),
                ));
            }
        }
        let colour_ty = self.check_expression(&write.colour)?;
        if colour_ty != Type::Colour {
            return Err(Self::error(
                write.line,
                format!("__write expects color, got {colour_ty}"),
            ));
        }
        Ok(())
    }

    fn check_write_box(&mut self, wbox: &WriteBox) -> SemResult<()> {
        for (expr, what) in [
            (&wbox.x, "x"),
            (&wbox.y, "y"),
            (&wbox.width, "width"),
            (&wbox.height, "height"),
        ] {
            let ty = self.check_expression(expr)?;
            if ty != Type::Int {
                return Err(Self::error(
                    wbox.line,
                    format!("__write_box expects int for {what}, got {ty}"),
                ));
            }
        }
        let colour_ty = self.check_expression(&wbox.colour)?;
        if colour_ty != Type::Colour {
            return Err(Self::error(
                wbox.line,
                format!("__write_box expects color, got {colour_ty}"),
            ));
        }
        Ok(())
    }

    fn check_if(&mut self, node: &If) -> SemResult<()> {
        let condition_ty = self.check_expression(&node.condition)?;
        if condition_ty != Type::Bool {
            return Err(Self::error(
                node.line,
                format!("if condition must be bool, got {condition_ty}"),
            ));
        }
        self.check_block(&node.then_block)?;
        if let Some(else_block) = &node.else_block {
            self.check_block(else_block)?;
        }
        Ok(())
    }

    fn check_while(&mut self, node: &While) -> SemResult<()> {
        let condition_ty = self.check_expression(&node.condition)?;
        if condition_ty != Type::Bool {
            return Err(Self::error(
                node.line,
                format!("while condition must be bool, got {condition_ty}"),
            ));
        }
        self.check_block(&node.body)
    }

    fn check_for(&mut self, node: &For) -> SemResult<()> {
        // The initialiser declares into the enclosing scope, mirroring the
        // frame the generator allocates it in.
        if let Some(init) = &node.init {
            if init.ty != Type::Int {
                return Err(Self::error(
                    init.line,
                    format!("for initialiser must be int, got {}", init.ty),
                ));
            }
            self.check_var_dec(init)?;
        }

        let condition_ty = self.check_expression(&node.condition)?;
        if condition_ty != Type::Bool {
            return Err(Self::error(
                node.line,
                format!("for condition must be bool, got {condition_ty}"),
            ));
        }

        if let Some(increment) = &node.increment {
            let increment_ty = self.check_assign(increment)?;
            if increment_ty != Type::Int {
                return Err(Self::error(
                    increment.line,
                    format!("for increment must be int, got {increment_ty}"),
                ));
            }
        }

        self.check_block(&node.body)
    }

    fn check_return(&mut self, ret: &Return) -> SemResult<()> {
        let Some(function) = self.current_function.clone() else {
            return Err(Self::error(ret.line, "return statement outside a function"));
        };
        let expr_ty = self.check_expression(&ret.expr)?;
        let ret_ty = self
            .table
            .lookup(&function, SymbolKind::Function)
            .map(|s| s.ty)
            .ok_or_else(|| Self::error(ret.line, "enclosing function is not declared"))?;
        if expr_ty != ret_ty {
            return Err(Self::error(
                ret.line,
                format!("return type mismatch: expected {ret_ty}, got {expr_ty}"),
            ));
        }
        Ok(())
    }

    fn check_function(&mut self, fun: &FunDec) -> SemResult<()> {
        if self.current_function.is_some() {
            return Err(Self::error(
                fun.line,
                format!("function `{}` declared inside another function", fun.name),
            ));
        }
        if self.table.declared_in_global(&fun.name) {
            return Err(Self::error(
                fun.line,
                format!("identifier `{}` already declared", fun.name),
            ));
        }
        for (i, param) in fun.params.iter().enumerate() {
            if fun.params[..i].iter().any(|p| p.name == param.name) {
                return Err(Self::error(
                    param.line,
                    format!("duplicate parameter `{}`", param.name),
                ));
            }
        }

        let params: Vec<Param> = fun
            .params
            .iter()
            .map(|p| Param {
                name: p.name.clone(),
                ty: p.ty,
            })
            .collect();

        // Declared before the body so the function can call itself.
        self.table
            .add_global_symbol(Symbol::function(&fun.name, fun.ret_type, params, fun.line));

        self.table.push_scope(ScopeKind::Function);
        for param in &fun.params {
            self.table
                .add_symbol(Symbol::variable(&param.name, param.ty, param.line));
        }
        self.current_function = Some(fun.name.clone());

        self.check_block(&fun.body)?;

        if !block_guarantees_return(&fun.body) {
            return Err(Self::error(
                fun.line,
                format!("function `{}` does not return on every path", fun.name),
            ));
        }

        self.current_function = None;
        self.table.pop_scope();
        Ok(())
    }

    fn check_expression(&mut self, expr: &Expr) -> SemResult<Type> {
        match expr {
            Expr::Literal(literal) => Ok(literal_type(&literal.value)),
            Expr::Variable(var) => self.check_variable(var),
            Expr::Unary(unary) => self.check_unary(unary),
            Expr::Binary(binary) => self.check_binary(binary),
            Expr::Cast(cast) => {
                self.check_expression(&cast.expr)?;
                Ok(cast.target)
            }
            Expr::Random(random) => {
                let bound_ty = self.check_expression(&random.bound)?;
                if bound_ty != Type::Int {
                    return Err(Self::error(
                        random.line,
                        format!("__random_int expects int, got {bound_ty}"),
                    ));
                }
                Ok(Type::Int)
            }
            Expr::Read(read) => {
                for (expr, what) in [(&read.x, "x"), (&read.y, "y")] {
                    let ty = self.check_expression(expr)?;
                    if ty != Type::Int {
                        return Err(Self::error(
                            read.line,
                            format!("__read expects int for {what}, got {ty}"),
                        ));
                    }
                }
                Ok(Type::Int)
            }
            Expr::Call(call) => self.check_call(call),
        }
    }

    fn check_variable(&mut self, var: &Variable) -> SemResult<Type> {
        let symbol = self
            .table
            .lookup(&var.name, SymbolKind::Variable)
            .ok_or_else(|| {
                Self::error(var.line, format!("undeclared identifier `{}`", var.name))
            })?;
        let ty = symbol.ty;
        let array_len = symbol.array_len;
        self.check_indexing(&var.name, var.index.as_deref(), array_len, var.line)?;
        Ok(ty)
    }

    fn check_unary(&mut self, unary: &Unary) -> SemResult<Type> {
        let operand_ty = self.check_expression(&unary.operand)?;
        match unary.op.as_str() {
            "not" => {
                if operand_ty != Type::Bool {
                    return Err(Self::error(
                        unary.line,
                        format!("not expects bool, got {operand_ty}"),
                    ));
                }
                Ok(Type::Bool)
            }
            "-" => {
                if !operand_ty.is_numeric() {
                    return Err(Self::error(
                        unary.line,
                        format!("unary minus expects int or float, got {operand_ty}"),
                    ));
                }
                if !matches!(
                    &*unary.operand,
                    Expr::Literal(Literal {
                        value: LiteralValue::Int(_) | LiteralValue::Float(_),
                        ..
                    })
                ) {
                    return Err(Self::error(
                        unary.line,
                        "unary minus applies to literals only",
                    ));
                }
                Ok(operand_ty)
            }
            op => Err(Self::error(unary.line, format!("malformed unary operator `{op}`"))),
        }
    }

    fn check_binary(&mut self, binary: &Binary) -> SemResult<Type> {
        let left_ty = self.check_expression(&binary.left)?;
        let right_ty = self.check_expression(&binary.right)?;

        if left_ty != right_ty {
            return Err(Self::error(
                binary.line,
                format!(
                    "type mismatch in binary operation: expected {left_ty}, got {right_ty}"
                ),
            ));
        }

        match binary.op.as_str() {
            "+" | "-" | "*" | "/" => {
                if !left_ty.is_numeric() {
                    return Err(Self::error(
                        binary.line,
                        format!("`{}` expects int or float, got {left_ty}", binary.op),
                    ));
                }
                Ok(left_ty)
            }
            "<" | ">" | "<=" | ">=" => {
                if !left_ty.is_numeric() {
                    return Err(Self::error(
                        binary.line,
                        format!("`{}` expects int or float, got {left_ty}", binary.op),
                    ));
                }
                Ok(Type::Bool)
            }
            "==" | "!=" => Ok(Type::Bool),
            "and" | "or" => {
                if left_ty != Type::Bool {
                    return Err(Self::error(
                        binary.line,
                        format!("`{}` expects bool, got {left_ty}", binary.op),
                    ));
                }
                Ok(Type::Bool)
            }
            op => Err(Self::error(
                binary.line,
                format!("malformed binary operator `{op}`"),
            )),
        }
    }

    fn check_call(&mut self, call: &Call) -> SemResult<Type> {
        let symbol = self
            .table
            .lookup(&call.name, SymbolKind::Function)
            .ok_or_else(|| {
                Self::error(call.line, format!("function `{}` is not declared", call.name))
            })?;
        let ret_ty = symbol.ty;
        let params = symbol.params.clone();

        if call.args.len() != params.len() {
            return Err(Self::error(
                call.line,
                format!(
                    "`{}` expects {} argument(s), got {}",
                    call.name,
                    params.len(),
                    call.args.len()
                ),
            ));
        }

        for (arg, param) in call.args.iter().zip(&params) {
            let arg_ty = self.check_expression(arg)?;
            if arg_ty != param.ty {
                return Err(Self::error(
                    arg.line(),
                    format!(
                        "argument `{}` of `{}` expects {}, got {}",
                        param.name, call.name, param.ty, arg_ty
                    ),
                ));
            }
        }

        Ok(ret_ty)
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of a literal value.
fn literal_type(value: &LiteralValue) -> Type {
    match value {
        LiteralValue::Int(_) | LiteralValue::Width | LiteralValue::Height => Type::Int,
        LiteralValue::Float(_) => Type::Float,
        LiteralValue::Bool(_) => Type::Bool,
        LiteralValue::Colour(_) => Type::Colour,
    }
}

/// Whether a block is guaranteed to return.
///
/// True when the last statement is a `return`, or an `if` with both
/// branches present and each branch guaranteeing a return in turn.
pub fn block_guarantees_return(block: &Block) -> bool {
    match block.statements.last() {
        Some(Stmt::Return(_)) => true,
        Some(Stmt::If(node)) => match &node.else_block {
            Some(else_block) => {
                block_guarantees_return(&node.then_block) && block_guarantees_return(else_block)
            }
            None => false,
        },
        _ => false,
    }
}
