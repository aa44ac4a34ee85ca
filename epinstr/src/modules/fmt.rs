//! Textual rendering of instructions and modules.
//!
//! The output is a compact, LLVM-flavored listing meant for diagnostics and
//! test assertions, not for parsing. Instructions render through
//! [`Instr::fmt`], which takes an optional module so call targets and string
//! constants can be resolved to names.
use crate::{
    modules::{
        Module,
        instructions::Instr,
        int::{IntegerSignedness, OverflowPolicy},
        operand::Name,
    },
    types::Type,
};

fn fmt_arith_iop(
    opname: &'static str,
    f: &mut std::fmt::Formatter<'_>,
    signedness: IntegerSignedness,
    overflow: OverflowPolicy,
) -> std::fmt::Result {
    use IntegerSignedness::*;
    use OverflowPolicy::*;

    match (overflow, signedness) {
        (Panic, Signed) => write!(f, "{} nsw ", opname),
        (Panic, Unsigned) => write!(f, "{} nuw ", opname),
        (Wrap, _) => write!(f, "{} ", opname),
    }
}

fn fmt_ret_type(f: &mut std::fmt::Formatter<'_>, ty: Option<Type>) -> std::fmt::Result {
    match ty {
        Some(ty) => write!(f, "{}", ty),
        None => write!(f, "void"),
    }
}

fn fmt_dest(f: &mut std::fmt::Formatter<'_>, dest: Option<Name>) -> std::fmt::Result {
    if let Some(dest) = dest {
        write!(f, "%{} = ", dest)?;
    }
    Ok(())
}

impl Instr {
    /// Build a formatting helper for this instruction. When a module is
    /// supplied, callee names and string contents are resolved through it.
    pub fn fmt<'a>(&'a self, module: Option<&'a Module>) -> impl std::fmt::Display + 'a {
        pub struct Fmt<'a> {
            instr: &'a Instr,
            module: Option<&'a Module>,
        }

        impl std::fmt::Display for Fmt<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.instr {
                    Instr::IAdd(op) => {
                        write!(f, "%{} = ", op.dest)?;
                        fmt_arith_iop("iadd", f, op.signedness, op.overflow)?;
                        write!(
                            f,
                            "{} {}, {}",
                            op.ty,
                            op.lhs.fmt(self.module),
                            op.rhs.fmt(self.module)
                        )
                    }
                    Instr::ISub(op) => {
                        write!(f, "%{} = ", op.dest)?;
                        fmt_arith_iop("isub", f, op.signedness, op.overflow)?;
                        write!(
                            f,
                            "{} {}, {}",
                            op.ty,
                            op.lhs.fmt(self.module),
                            op.rhs.fmt(self.module)
                        )
                    }
                    Instr::IMul(op) => {
                        write!(f, "%{} = ", op.dest)?;
                        fmt_arith_iop("imul", f, op.signedness, op.overflow)?;
                        write!(
                            f,
                            "{} {}, {}",
                            op.ty,
                            op.lhs.fmt(self.module),
                            op.rhs.fmt(self.module)
                        )
                    }
                    Instr::ICmp(op) => {
                        write!(
                            f,
                            "%{} = icmp {} {} {}, {}",
                            op.dest,
                            op.variant.to_str(),
                            op.ty,
                            op.lhs.fmt(self.module),
                            op.rhs.fmt(self.module)
                        )
                    }
                    Instr::MLoad(op) => {
                        write!(f, "%{} = load ", op.dest)?;
                        if op.volatile {
                            write!(f, "volatile ")?;
                        }
                        write!(f, "{} {}", op.ty, op.addr.fmt(self.module))
                    }
                    Instr::MStore(op) => {
                        write!(f, "store ")?;
                        if op.volatile {
                            write!(f, "volatile ")?;
                        }
                        write!(
                            f,
                            "{}, {}",
                            op.addr.fmt(self.module),
                            op.value.fmt(self.module)
                        )
                    }
                    Instr::MAlloca(op) => {
                        write!(f, "%{} = alloca {}", op.dest, op.ty)
                    }
                    Instr::Call(op) => {
                        fmt_dest(f, op.dest)?;
                        write!(f, "call ")?;
                        fmt_ret_type(f, op.ty)?;
                        match self.module.and_then(|m| m.symbol_name(op.function)) {
                            Some(name) => write!(f, " @{}(", name)?,
                            None => write!(f, " @{}(", op.function.uuid())?,
                        }
                        for (i, arg) in op.args.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{}", arg.fmt(self.module))?;
                        }
                        write!(f, ")")
                    }
                    Instr::Phi(op) => {
                        write!(f, "%{} = phi {}", op.dest, op.ty)?;
                        for (i, (label, value)) in op.values.iter().enumerate() {
                            if i > 0 {
                                write!(f, ",")?;
                            }
                            write!(f, " [{}, {}]", label, value.fmt(self.module))?;
                        }
                        Ok(())
                    }
                }
            }
        }

        Fmt {
            instr: self,
            module,
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "unit {:?}", self.name)?;

        for external in &self.external_functions {
            write!(f, "declare @{}(", external.name)?;
            for (i, ty) in external.param_types.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", ty)?;
            }
            write!(f, ") -> ")?;
            fmt_ret_type(f, external.return_type)?;
            writeln!(f)?;
        }

        for function in &self.functions {
            write!(f, "define @{}(", function.name)?;
            for (i, (name, ty)) in function.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "%{}: {}", name, ty)?;
            }
            write!(f, ") -> ")?;
            fmt_ret_type(f, function.return_type)?;
            writeln!(f, " {{")?;
            for bb in &function.blocks {
                writeln!(f, "{}:", bb.label)?;
                for instr in &bb.instructions {
                    writeln!(f, "    {}", instr.fmt(Some(self)))?;
                }
                writeln!(f, "    {}", bb.terminator.fmt(Some(self)))?;
            }
            writeln!(f, "}}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        modules::{
            BasicBlock, Function, Module,
            control_flow::{Ret, Terminator},
            misc::Call,
            operand::{Label, Operand},
            symbol::FunctionPointer,
        },
        types::Type,
    };

    #[test]
    fn renders_call_with_resolved_names() {
        let mut module = Module::new("demo");
        let log = module.declare_external("log_function_call", vec![Type::Ptr], None);
        let id = module.intern_str("foo");
        let mut bb = BasicBlock::new(Label::ENTRY, Terminator::Ret(Ret { value: None }));
        bb.instructions.push(
            Call {
                function: FunctionPointer::External(log),
                args: vec![Operand::Str(id)],
                dest: None,
                ty: None,
            }
            .into(),
        );
        module.define_function(Function::new("foo", vec![], None, vec![bb]));

        let rendered = module.to_string();
        assert!(rendered.contains("declare @log_function_call(ptr) -> void"));
        assert!(rendered.contains("define @foo() -> void {"));
        assert!(rendered.contains("call void @log_function_call(str \"foo\")"));
        assert!(rendered.contains("ret void"));
    }
}
