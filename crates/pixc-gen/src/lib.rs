//! pixc-gen - Stack-machine code generation for PixIR.
//!
//! The generator walks the AST a second time, re-resolving names and
//! re-checking types under the same symbol-table contract as the semantic
//! analyser, while lowering to PixIR text. It owns the frame model:
//! entering a block opens a frame sized from the block's declarations,
//! every variable gets a `(frame index, frame level)` address assigned
//! exactly once at declaration, and references address `[index:delta]`
//! where `delta` is the distance from the current frame to the declaring
//! frame.
//!
//! Jumps are PC-relative and back-patched through the in-memory emission
//! buffer; functions are emitted in place behind a fence jump so the
//! surrounding statement stream falls through them.
//!
//! # Example
//!
//! ```
//! use pixc_gen::CodeGenerator;
//! use pixc_lex::Lexer;
//! use pixc_par::Parser;
//!
//! let tokens = Lexer::new("__print 42;").tokenize().unwrap();
//! let program = Parser::new(tokens).parse_program().unwrap();
//! let asm = CodeGenerator::new().generate(&program).unwrap();
//! assert!(asm.contains("push 42\nprint\n"));
//! ```

pub mod asm;

pub use asm::{Emitter, Instr, Operand};

use pixc_par::ast::*;
use pixc_par::Type;
use pixc_sem::{block_guarantees_return, Param, ScopeKind, Symbol, SymbolKind, SymbolTable};
use pixc_util::CodegenError;

type CodegenResult<T> = Result<T, CodegenError>;

/// Number of frame slots a statement sequence declares.
///
/// Scalars take one slot, arrays as many as they have elements, and a
/// for-loop initialiser lives in the enclosing frame. Anything else
/// allocates inside its own nested frame.
fn frame_slots(statements: &[Stmt]) -> usize {
    statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::VarDec(_) => 1,
            Stmt::ArrayDec(dec) => dec.elements.len(),
            Stmt::For(node) => usize::from(node.init.is_some()),
            _ => 0,
        })
        .sum()
}

/// The code generator.
pub struct CodeGenerator {
    table: SymbolTable,
    emitter: Emitter,
    current_function: Option<String>,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            emitter: Emitter::new(),
            current_function: None,
        }
    }

    /// Lowers a program to PixIR text.
    ///
    /// On error the partial buffer is dropped with the generator; nothing
    /// reaches the output sink.
    pub fn generate(mut self, program: &Program) -> CodegenResult<String> {
        // Preamble: enter the program past the halt slot, then open the
        // global frame.
        self.emitter.emit(Instr::Label("main".to_string()));
        self.emitter.emit(Instr::Push(Operand::Int(4)));
        self.emitter.emit(Instr::Jmp);
        self.emitter.emit(Instr::Halt);
        self.emitter.emit(Instr::Push(Operand::Int(
            frame_slots(&program.statements) as i64,
        )));
        self.emitter.emit(Instr::Oframe);

        for statement in &program.statements {
            self.gen_statement(statement)?;
        }

        self.emitter.emit(Instr::Cframe);
        self.emitter.emit(Instr::Halt);

        Ok(self.emitter.render())
    }

    fn type_error(line: u32, message: impl Into<String>) -> CodegenError {
        CodegenError::Type {
            line,
            message: message.into(),
        }
    }

    fn gen_statement(&mut self, statement: &Stmt) -> CodegenResult<()> {
        match statement {
            Stmt::VarDec(dec) => self.gen_var_dec(dec),
            Stmt::ArrayDec(dec) => self.gen_array_dec(dec),
            Stmt::Assign(assign) => self.gen_assign(assign).map(|_| ()),
            Stmt::Print(print) => {
                self.gen_expression(&print.expr)?;
                self.emitter.emit(Instr::Print);
                Ok(())
            }
            Stmt::Delay(delay) => {
                let ty = self.gen_expression(&delay.expr)?;
                if !ty.is_numeric() {
                    return Err(Self::type_error(
                        delay.line,
                        format!("__delay expects int or float, got {ty}"),
                    ));
                }
                self.emitter.emit(Instr::Delay);
                Ok(())
            }
            Stmt::Write(write) => self.gen_write(write),
            Stmt::WriteBox(wbox) => self.gen_write_box(wbox),
            Stmt::If(node) => self.gen_if(node),
            Stmt::While(node) => self.gen_while(node),
            Stmt::For(node) => self.gen_for(node),
            Stmt::Return(ret) => self.gen_return(ret),
            Stmt::Fun(fun) => self.gen_function(fun),
            Stmt::Block(block) => self.gen_block(block),
        }
    }

    /// `push N`, `oframe`, the statements, `cframe`.
    fn gen_block(&mut self, block: &Block) -> CodegenResult<()> {
        let slots = frame_slots(&block.statements);
        self.emitter.emit(Instr::Push(Operand::Int(slots as i64)));
        self.emitter.emit(Instr::Oframe);
        self.table.push_scope(ScopeKind::Block);

        for statement in &block.statements {
            self.gen_statement(statement)?;
        }

        self.table.pop_scope();
        self.emitter.emit(Instr::Cframe);
        Ok(())
    }

    /// Value, then `push index`, `push 0`, `st`.
    fn gen_var_dec(&mut self, dec: &VarDec) -> CodegenResult<()> {
        let init_ty = self.gen_expression(&dec.init)?;
        self.check_declarable(&dec.name, dec.line)?;
        if dec.ty != init_ty {
            return Err(Self::type_error(
                dec.line,
                format!(
                    "type mismatch in declaration of `{}`: expected {}, got {}",
                    dec.name, dec.ty, init_ty
                ),
            ));
        }

        let index = self.table.current_frame_index();
        let level = self.table.current_frame_level();
        self.emitter.emit(Instr::Push(Operand::Int(index as i64)));
        self.emitter.emit(Instr::Push(Operand::Int(0)));
        self.emitter.emit(Instr::St);

        self.table
            .add_symbol(Symbol::variable(&dec.name, dec.ty, dec.line));
        self.table.set_location(&dec.name, index, level);
        Ok(())
    }

    /// Each element stored at consecutive slots from the array's base.
    fn gen_array_dec(&mut self, dec: &ArrayDec) -> CodegenResult<()> {
        self.check_declarable(&dec.name, dec.line)?;
        if let Some(len) = dec.len {
            if len != dec.elements.len() {
                return Err(Self::type_error(
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

        let base = self.table.current_frame_index();
        let level = self.table.current_frame_level();

        for (offset, element) in dec.elements.iter().enumerate() {
            let element_ty = self.gen_expression(element)?;
            if element_ty != dec.ty {
                return Err(Self::type_error(
                    element.line(),
                    format!(
                        "type mismatch in array `{}`: expected {}, got {}",
                        dec.name, dec.ty, element_ty
                    ),
                ));
            }
            self.emitter
                .emit(Instr::Push(Operand::Int((base + offset) as i64)));
            self.emitter.emit(Instr::Push(Operand::Int(0)));
            self.emitter.emit(Instr::St);
        }

        self.table.add_symbol(Symbol::array(
            &dec.name,
            dec.ty,
            dec.elements.len(),
            dec.line,
        ));
        self.table.set_location(&dec.name, base, level);
        Ok(())
    }

    fn check_declarable(&self, name: &str, line: u32) -> CodegenResult<()> {
        if let Some(function) = &self.current_function {
            let clashes = self
                .table
                .get_params(function)
                .map_or(false, |params| params.iter().any(|p| p.name == name));
            if clashes {
                return Err(Self::type_error(
                    line,
                    format!("variable `{name}` clashes with a parameter name"),
                ));
            }
        }
        if self.table.declared_in_current(name) {
            return Err(Self::type_error(
                line,
                format!("identifier `{name}` already declared in this scope"),
            ));
        }
        Ok(())
    }

    /// Resolves a variable to its frame address, applying a literal array
    /// offset when indexed.
    fn resolve_address(
        &mut self,
        name: &str,
        index: Option<&Expr>,
        line: u32,
    ) -> CodegenResult<(Type, usize, usize)> {
        let symbol = self
            .table
            .lookup(name, SymbolKind::Variable)
            .ok_or_else(|| CodegenError::UnresolvedName {
                line,
                name: name.to_string(),
            })?;
        let ty = symbol.ty;
        let array_len = symbol.array_len;
        let frame_index = symbol.frame_index;
        let frame_level = symbol.frame_level;

        let offset = match (index, array_len) {
            (None, None) => 0,
            (None, Some(_)) => {
                return Err(Self::type_error(line, format!("array `{name}` needs an index")))
            }
            (Some(_), None) => {
                return Err(Self::type_error(line, format!("`{name}` is not an array")))
            }
            (Some(expr), Some(len)) => match expr {
                Expr::Literal(Literal {
                    value: LiteralValue::Int(k),
                    ..
                }) if *k >= 0 && (*k as usize) < len => *k as usize,
                Expr::Literal(Literal {
                    value: LiteralValue::Int(k),
                    ..
                }) => {
                    return Err(Self::type_error(
                        expr.line(),
                        format!("index {k} is out of bounds for `{name}` (length {len})"),
                    ))
                }
                _ => {
                    return Err(Self::type_error(
                        expr.line(),
                        format!("index into `{name}` must be an integer literal"),
                    ))
                }
            },
        };

        let (Some(frame_index), Some(frame_level)) = (frame_index, frame_level) else {
            return Err(CodegenError::Internal(format!(
                "variable `{name}` has no frame address"
            )));
        };
        Ok((ty, frame_index + offset, frame_level))
    }

    /// Value, then `push index`, `push delta`, `st`.
    fn gen_assign(&mut self, assign: &Assign) -> CodegenResult<Type> {
        let (target_ty, index, declared_level) =
            self.resolve_address(&assign.target, assign.index.as_ref(), assign.line)?;

        let value_ty = self.gen_expression(&assign.value)?;
        if value_ty != target_ty {
            return Err(Self::type_error(
                assign.line,
                format!(
                    "type mismatch in assignment to `{}`: expected {}, got {}",
                    assign.target, target_ty, value_ty
                ),
            ));
        }

        let delta = self.table.current_frame_level() - declared_level;
        self.emitter.emit(Instr::Push(Operand::Int(index as i64)));
        self.emitter.emit(Instr::Push(Operand::Int(delta as i64)));
        self.emitter.emit(Instr::St);
        Ok(target_ty)
    }

    /// Arguments right-to-left so x lands on top, then `write`.
    fn gen_write(&mut self, write: &Write) -> CodegenResult<()> {
        let colour_ty = self.gen_expression(&write.colour)?;
        let y_ty = self.gen_expression(&write.y)?;
        let x_ty = self.gen_expression(&write.x)?;

        if x_ty != Type::Int || y_ty != Type::Int {
            return Err(Self::type_error(
                write.line,
                "__write expects int coordinates",
            ));
        }
        if colour_ty != Type::Colour {
            return Err(Self::type_error(
                write.line,
                format!("__write expects color, got {colour_ty}"),
            ));
        }
        self.emitter.emit(Instr::Write);
        Ok(())
    }

    fn gen_write_box(&mut self, wbox: &WriteBox) -> CodegenResult<()> {
        let colour_ty = self.gen_expression(&wbox.colour)?;
        let height_ty = self.gen_expression(&wbox.height)?;
        let width_ty = self.gen_expression(&wbox.width)?;
        let y_ty = self.gen_expression(&wbox.y)?;
        let x_ty = self.gen_expression(&wbox.x)?;

        if [x_ty, y_ty, width_ty, height_ty]
            .iter()
            .any(|ty| *ty != Type::Int)
        {
            return Err(Self::type_error(
                wbox.line,
                "__write_box expects int coordinates and extent",
            ));
        }
        if colour_ty != Type::Colour {
            return Err(Self::type_error(
                wbox.line,
                format!("__write_box expects color, got {colour_ty}"),
            ));
        }
        self.emitter.emit(Instr::WriteBox);
        Ok(())
    }

    /// `cond`, `push #PC+4`, `cjmp` into the branch, a patched forward
    /// jump around it, the then-block, and for `else` a second patched
    /// jump from the end of the then-block past the else-block.
    fn gen_if(&mut self, node: &If) -> CodegenResult<()> {
        let condition_ty = self.gen_expression(&node.condition)?;
        if condition_ty != Type::Bool {
            return Err(Self::type_error(
                node.line,
                format!("if condition must be bool, got {condition_ty}"),
            ));
        }

        self.emitter.emit(Instr::Push(Operand::PcOffset(4)));
        self.emitter.emit(Instr::Cjmp);
        let skip_then = self.emitter.emit_placeholder();
        self.emitter.emit(Instr::Jmp);

        self.gen_block(&node.then_block)?;

        match &node.else_block {
            None => {
                let end = self.emitter.len();
                self.emitter.patch(skip_then, end);
            }
            Some(else_block) => {
                let skip_else = self.emitter.emit_placeholder();
                self.emitter.emit(Instr::Jmp);

                let else_start = self.emitter.len();
                self.emitter.patch(skip_then, else_start);

                self.gen_block(else_block)?;
                let end = self.emitter.len();
                self.emitter.patch(skip_else, end);
            }
        }
        Ok(())
    }

    /// Condition, conditional entry, patched exit jump, body, and a
    /// backward jump to the condition.
    fn gen_while(&mut self, node: &While) -> CodegenResult<()> {
        let condition_start = self.emitter.len();
        let condition_ty = self.gen_expression(&node.condition)?;
        if condition_ty != Type::Bool {
            return Err(Self::type_error(
                node.line,
                format!("while condition must be bool, got {condition_ty}"),
            ));
        }

        self.emitter.emit(Instr::Push(Operand::PcOffset(4)));
        self.emitter.emit(Instr::Cjmp);
        let exit = self.emitter.emit_placeholder();
        self.emitter.emit(Instr::Jmp);

        self.gen_block(&node.body)?;

        let back = self.emitter.emit_placeholder();
        self.emitter.patch(back, condition_start);
        self.emitter.emit(Instr::Jmp);

        let end = self.emitter.len();
        self.emitter.patch(exit, end);
        Ok(())
    }

    /// init once, then condition, body, increment, backward jump.
    fn gen_for(&mut self, node: &For) -> CodegenResult<()> {
        if let Some(init) = &node.init {
            if init.ty != Type::Int {
                return Err(Self::type_error(
                    init.line,
                    format!("for initialiser must be int, got {}", init.ty),
                ));
            }
            self.gen_var_dec(init)?;
        }

        let condition_start = self.emitter.len();
        let condition_ty = self.gen_expression(&node.condition)?;
        if condition_ty != Type::Bool {
            return Err(Self::type_error(
                node.line,
                format!("for condition must be bool, got {condition_ty}"),
            ));
        }

        self.emitter.emit(Instr::Push(Operand::PcOffset(4)));
        self.emitter.emit(Instr::Cjmp);
        let exit = self.emitter.emit_placeholder();
        self.emitter.emit(Instr::Jmp);

        self.gen_block(&node.body)?;

        if let Some(increment) = &node.increment {
            let increment_ty = self.gen_assign(increment)?;
            if increment_ty != Type::Int {
                return Err(Self::type_error(
                    increment.line,
                    format!("for increment must be int, got {increment_ty}"),
                ));
            }
        }

        let back = self.emitter.emit_placeholder();
        self.emitter.patch(back, condition_start);
        self.emitter.emit(Instr::Jmp);

        let end = self.emitter.len();
        self.emitter.patch(exit, end);
        Ok(())
    }

    fn gen_return(&mut self, ret: &Return) -> CodegenResult<()> {
        let Some(function) = self.current_function.clone() else {
            return Err(Self::type_error(ret.line, "return statement outside a function"));
        };
        let expr_ty = self.gen_expression(&ret.expr)?;
        self.emitter.emit(Instr::Ret);

        let ret_ty = self
            .table
            .lookup(&function, SymbolKind::Function)
            .map(|s| s.ty)
            .ok_or_else(|| {
                CodegenError::Internal(format!("enclosing function `{function}` is not declared"))
            })?;
        if expr_ty != ret_ty {
            return Err(Self::type_error(
                ret.line,
                format!("return type mismatch: expected {ret_ty}, got {expr_ty}"),
            ));
        }
        Ok(())
    }

    /// Fence jump over the body, `.name` label, the body block, and a
    /// guaranteed trailing `ret`.
    fn gen_function(&mut self, fun: &FunDec) -> CodegenResult<()> {
        if self.current_function.is_some() {
            return Err(Self::type_error(
                fun.line,
                format!("function `{}` declared inside another function", fun.name),
            ));
        }
        if self.table.declared_in_global(&fun.name) {
            return Err(Self::type_error(
                fun.line,
                format!("identifier `{}` already declared", fun.name),
            ));
        }

        let fence = self.emitter.emit_placeholder();
        self.emitter.emit(Instr::Jmp);
        self.emitter.emit(Instr::Label(fun.name.clone()));

        let params: Vec<Param> = fun
            .params
            .iter()
            .map(|p| Param {
                name: p.name.clone(),
                ty: p.ty,
            })
            .collect();
        self.table
            .add_global_symbol(Symbol::function(&fun.name, fun.ret_type, params, fun.line));

        // The VM's `call` builds the function frame from the pushed
        // arguments, so parameters occupy slots 0..n of that frame.
        self.table.push_scope(ScopeKind::Function);
        let param_level = self.table.current_frame_level();
        for (index, param) in fun.params.iter().enumerate() {
            self.table
                .add_symbol(Symbol::variable(&param.name, param.ty, param.line));
            self.table.set_location(&param.name, index, param_level);
        }
        self.current_function = Some(fun.name.clone());

        self.gen_block(&fun.body)?;

        if !block_guarantees_return(&fun.body) {
            return Err(Self::type_error(
                fun.line,
                format!("function `{}` does not return on every path", fun.name),
            ));
        }

        // The body block closed its frame after the final `ret`; the last
        // emitted instruction of a function must be `ret`.
        match fun.body.statements.last() {
            Some(Stmt::Return(_)) => self.emitter.swap_last_two(),
            Some(Stmt::If(_)) => self.emitter.emit(Instr::Ret),
            _ => {
                return Err(CodegenError::Internal(format!(
                    "function `{}` passed the return check without a trailing return",
                    fun.name
                )))
            }
        }

        self.current_function = None;
        self.table.pop_scope();

        let past_body = self.emitter.len();
        self.emitter.patch(fence, past_body);
        Ok(())
    }

    fn gen_expression(&mut self, expr: &Expr) -> CodegenResult<Type> {
        match expr {
            Expr::Literal(literal) => self.gen_literal(literal),
            Expr::Variable(var) => self.gen_variable(var),
            Expr::Unary(unary) => self.gen_unary(unary),
            Expr::Binary(binary) => self.gen_binary(binary),
            Expr::Cast(cast) => {
                // Casts are static reinterpretation; nothing is emitted.
                self.gen_expression(&cast.expr)?;
                Ok(cast.target)
            }
            Expr::Random(random) => {
                let bound_ty = self.gen_expression(&random.bound)?;
                if bound_ty != Type::Int {
                    return Err(Self::type_error(
                        random.line,
                        format!("__random_int expects int, got {bound_ty}"),
                    ));
                }
                self.emitter.emit(Instr::Irnd);
                Ok(Type::Int)
            }
            Expr::Read(read) => {
                let y_ty = self.gen_expression(&read.y)?;
                let x_ty = self.gen_expression(&read.x)?;
                if x_ty != Type::Int || y_ty != Type::Int {
                    return Err(Self::type_error(
                        read.line,
                        "__read expects int coordinates",
                    ));
                }
                self.emitter.emit(Instr::Read);
                Ok(Type::Int)
            }
            Expr::Call(call) => self.gen_call(call),
        }
    }

    fn gen_literal(&mut self, literal: &Literal) -> CodegenResult<Type> {
        match &literal.value {
            LiteralValue::Int(v) => {
                self.emitter.emit(Instr::Push(Operand::Int(*v)));
                Ok(Type::Int)
            }
            LiteralValue::Float(v) => {
                self.emitter.emit(Instr::Push(Operand::Float(*v)));
                Ok(Type::Float)
            }
            LiteralValue::Bool(v) => {
                self.emitter
                    .emit(Instr::Push(Operand::Int(i64::from(*v))));
                Ok(Type::Bool)
            }
            LiteralValue::Colour(c) => {
                self.emitter.emit(Instr::Push(Operand::Colour(c.clone())));
                Ok(Type::Colour)
            }
            LiteralValue::Width => {
                self.emitter.emit(Instr::Width);
                Ok(Type::Int)
            }
            LiteralValue::Height => {
                self.emitter.emit(Instr::Height);
                Ok(Type::Int)
            }
        }
    }

    /// `push [index:delta]`.
    fn gen_variable(&mut self, var: &Variable) -> CodegenResult<Type> {
        let (ty, index, declared_level) =
            self.resolve_address(&var.name, var.index.as_deref(), var.line)?;
        let delta = self.table.current_frame_level() - declared_level;
        self.emitter.emit(Instr::Push(Operand::Frame {
            index,
            level: delta,
        }));
        Ok(ty)
    }

    fn gen_unary(&mut self, unary: &Unary) -> CodegenResult<Type> {
        match unary.op.as_str() {
            "not" => {
                let operand_ty = self.gen_expression(&unary.operand)?;
                if operand_ty != Type::Bool {
                    return Err(Self::type_error(
                        unary.line,
                        format!("not expects bool, got {operand_ty}"),
                    ));
                }
                self.emitter.emit(Instr::Not);
                Ok(Type::Bool)
            }
            // There is no negation opcode; the sign folds into the
            // literal immediate.
            "-" => match &*unary.operand {
                Expr::Literal(Literal {
                    value: LiteralValue::Int(v),
                    ..
                }) => {
                    self.emitter.emit(Instr::Push(Operand::Int(-v)));
                    Ok(Type::Int)
                }
                Expr::Literal(Literal {
                    value: LiteralValue::Float(v),
                    ..
                }) => {
                    self.emitter.emit(Instr::Push(Operand::Float(-v)));
                    Ok(Type::Float)
                }
                _ => Err(Self::type_error(
                    unary.line,
                    "unary minus applies to literals only",
                )),
            },
            op => Err(CodegenError::Internal(format!(
                "malformed unary operator `{op}`"
            ))),
        }
    }

    /// Right operand first, then left, then the opcode. The order is an
    /// observable contract of the emitted code.
    fn gen_binary(&mut self, binary: &Binary) -> CodegenResult<Type> {
        let right_ty = self.gen_expression(&binary.right)?;
        let left_ty = self.gen_expression(&binary.left)?;

        if left_ty != right_ty {
            return Err(Self::type_error(
                binary.line,
                format!("type mismatch in binary operation: expected {left_ty}, got {right_ty}"),
            ));
        }

        match binary.op.as_str() {
            "+" | "-" | "*" | "/" => {
                if !left_ty.is_numeric() {
                    return Err(Self::type_error(
                        binary.line,
                        format!("`{}` expects int or float, got {left_ty}", binary.op),
                    ));
                }
                self.emitter.emit(match binary.op.as_str() {
                    "+" => Instr::Add,
                    "-" => Instr::Sub,
                    "*" => Instr::Mul,
                    _ => Instr::Div,
                });
                Ok(left_ty)
            }
            "<" | ">" | "<=" | ">=" => {
                if !left_ty.is_numeric() {
                    return Err(Self::type_error(
                        binary.line,
                        format!("`{}` expects int or float, got {left_ty}", binary.op),
                    ));
                }
                self.emitter.emit(match binary.op.as_str() {
                    "<" => Instr::Lt,
                    ">" => Instr::Gt,
                    "<=" => Instr::Le,
                    _ => Instr::Ge,
                });
                Ok(Type::Bool)
            }
            "==" => {
                self.emitter.emit(Instr::Eq);
                Ok(Type::Bool)
            }
            "!=" => {
                self.emitter.emit(Instr::Eq);
                self.emitter.emit(Instr::Not);
                Ok(Type::Bool)
            }
            "and" | "or" => {
                if left_ty != Type::Bool {
                    return Err(Self::type_error(
                        binary.line,
                        format!("`{}` expects bool, got {left_ty}", binary.op),
                    ));
                }
                self.emitter.emit(if binary.op == "and" {
                    Instr::And
                } else {
                    Instr::Or
                });
                Ok(Type::Bool)
            }
            op => Err(CodegenError::Internal(format!(
                "malformed binary operator `{op}`"
            ))),
        }
    }

    /// Arguments in declared order, `push .name`, `call`.
    fn gen_call(&mut self, call: &Call) -> CodegenResult<Type> {
        let symbol = self
            .table
            .lookup(&call.name, SymbolKind::Function)
            .ok_or_else(|| CodegenError::UnresolvedName {
                line: call.line,
                name: call.name.clone(),
            })?;
        let ret_ty = symbol.ty;
        let params = symbol.params.clone();

        if call.args.len() != params.len() {
            return Err(Self::type_error(
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
            let arg_ty = self.gen_expression(arg)?;
            if arg_ty != param.ty {
                return Err(Self::type_error(
                    arg.line(),
                    format!(
                        "argument `{}` of `{}` expects {}, got {}",
                        param.name, call.name, param.ty, arg_ty
                    ),
                ));
            }
        }

        self.emitter
            .emit(Instr::Push(Operand::Label(call.name.clone())));
        self.emitter.emit(Instr::Call);
        Ok(ret_ty)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
