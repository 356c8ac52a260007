//! Textual dump of functions. Only meant for debug output, there is no parser for it.

use std::fmt::Display;

use crate::{FuncRef, InstKind, InstRef, Module};

pub struct FunctionDisplay<'a> {
    module: &'a Module,
    function: FuncRef,
}

impl Module {
    pub fn display_function(&self, function: FuncRef) -> FunctionDisplay<'_> {
        FunctionDisplay {
            module: self,
            function,
        }
    }
}

impl<'a> FunctionDisplay<'a> {
    fn value_name(&self, numbering: &[InstRef], inst: InstRef) -> String {
        match numbering.iter().position(|i| *i == inst) {
            Some(idx) => format!("%{idx}"),
            None => format!("<{inst:?}>"),
        }
    }
}

impl<'a> Display for FunctionDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(func) = self.module.function(self.function) else {
            return write!(f, "<invalid function {:?}>", self.function);
        };
        if !func.is_definition() {
            return writeln!(f, "declare @{}", func.name);
        }

        let numbering = self.module.function_insts(self.function);
        writeln!(f, "fn @{} {{", func.name)?;
        for (bidx, block) in func.blocks().iter().enumerate() {
            writeln!(f, "bb{bidx}:")?;
            for inst in self.module[*block].insts() {
                let instruction = &self.module[*inst];
                write!(f, "  {} = ", self.value_name(&numbering, *inst))?;
                match &instruction.kind {
                    InstKind::Argument(idx) => write!(f, "argument {idx}")?,
                    InstKind::Literal(v) => write!(f, "literal {v}")?,
                    InstKind::FunctionRef(callee) => match self.module.function(*callee) {
                        Some(callee) => write!(f, "function_ref @{}", callee.name)?,
                        None => write!(f, "function_ref <invalid {callee:?}>")?,
                    },
                    InstKind::AllocStack(ty) => write!(f, "alloc_stack ${ty}")?,
                    InstKind::DebugValue(name) => write!(f, "debug_value \"{name}\"")?,
                    InstKind::Apply(site) => {
                        write!(f, "apply")?;
                        if !site.substitutions.is_empty() {
                            let subs = site
                                .substitutions
                                .iter()
                                .map(|s| s.to_string())
                                .collect::<Vec<_>>()
                                .join(", ");
                            write!(f, "<{subs}>")?;
                        }
                        if !site.can_optimize {
                            write!(f, " [dynamic]")?;
                        }
                    }
                    other => write!(f, "{}", other.mnemonic())?,
                }
                for op in instruction.operands() {
                    write!(f, " {}", self.value_name(&numbering, *op))?;
                }
                writeln!(f)?;
            }
        }
        writeln!(f, "}}")
    }
}
