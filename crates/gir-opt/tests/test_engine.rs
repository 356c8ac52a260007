#![allow(dead_code)]

use ahash::{AHashMap, AHashSet};
use gir::{ApplySite, FuncRef, InstKind, InstRef, Module, Ty};
use gir_opt::{
    engine::{NewFunctions, Specialization, SpecializationEngine},
    remark::RemarkSink,
    OptError,
};
use smallvec::{smallvec, SmallVec};

///Engine used by the tests. Creates a trivial body per (callee, substitution) pair, and rewrites the apply to a
/// direct call of it. Panics if it is handed a deleted or invalid apply.
#[derive(Default)]
pub struct TestEngine {
    cache: AHashMap<(FuncRef, Vec<Ty>), FuncRef>,
    ///Callees the engine refuses to specialize.
    pub declined: AHashSet<FuncRef>,
    ///Every apply the engine was asked to specialize, in order.
    pub attempts: Vec<InstRef>,
    pub created: Vec<FuncRef>,
    ///Additionally reported dead when specializing the key.
    pub extra_dead: AHashMap<InstRef, SmallVec<[InstRef; 4]>>,
    ///Deleted by the engine itself, without telling anyone, when specializing the key.
    pub unreported_deletes: AHashMap<InstRef, InstRef>,
}

impl TestEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpecializationEngine for TestEngine {
    fn try_specialize(
        &mut self,
        module: &mut Module,
        apply: InstRef,
        _remarks: &mut dyn RemarkSink,
    ) -> Result<Specialization, OptError> {
        let inst = module
            .inst(apply)
            .unwrap_or_else(|| panic!("engine was handed freed instruction {apply:?}"));
        let site = inst.apply_site().expect("engine was handed a non-apply").clone();
        let args = inst.operands()[1..].to_vec();
        let callee = module
            .referenced_function(apply)
            .expect("engine was handed an apply without known callee");
        assert!(site.can_optimize && module[callee].should_optimize);

        self.attempts.push(apply);
        if self.declined.contains(&callee) {
            return Ok(Specialization::declined());
        }

        let mut new_functions = NewFunctions::new();
        let key = (callee, site.substitutions.to_vec());
        let specialized = match self.cache.get(&key) {
            Some(existing) => *existing,
            None => {
                let subs = site
                    .substitutions
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let name = format!("{}<{}>", module[callee].name, subs);
                let f = module.add_function(name);
                let bb = module.append_block(f)?;
                let arg = module.append_inst(bb, InstKind::Argument(0), &[])?;
                module.append_inst(bb, InstKind::Return, &[arg])?;

                self.cache.insert(key, f);
                self.created.push(f);
                new_functions.push(f);
                f
            }
        };

        let fref = module.insert_inst_before(apply, InstKind::FunctionRef(specialized), &[])?;
        let mut operands = vec![fref];
        operands.extend(args);
        let call = module.insert_inst_before(apply, InstKind::Apply(ApplySite::new([])), &operands)?;
        module.replace_all_uses_with(apply, call)?;

        if let Some(victim) = self.unreported_deletes.get(&apply) {
            module.recursively_delete_dead(*victim, true)?;
        }
        let mut dead = smallvec![apply];
        if let Some(extra) = self.extra_dead.get(&apply) {
            dead.extend(extra.iter().cloned());
        }

        Ok(Specialization {
            dead,
            new_functions,
        })
    }
}

#[allow(dead_code)]
pub fn init_log() {
    let _ = pretty_env_logger::try_init();
}

#[allow(dead_code)]
pub fn uint16() -> Ty {
    Ty::named("UInt16")
}

///Defines `name<T>(v: T) -> Bool`. The body is irrelevant, it only has to be visible.
#[allow(dead_code)]
pub fn define_generic(module: &mut Module, name: &str) -> FuncRef {
    let f = module.add_function(name);
    let bb = module.append_block(f).unwrap();
    let arg = module.append_inst(bb, InstKind::Argument(0), &[]).unwrap();
    module.append_inst(bb, InstKind::Return, &[arg]).unwrap();
    f
}

///Builds a function that stores its argument to the stack and calls each of `calls` with that address.
/// The result of the last call is returned. Mirrors
///
/// ```text
/// %0 = argument 0
/// %1 = debug_value "v" %0
/// %2 = alloc_stack $UInt16
/// %3 = store %0 %2
/// %4 = function_ref @f
/// %5 = apply<UInt16> %4 %2
/// ...
/// %n = dealloc_stack %2
/// %m = return %5
/// ```
///
/// Returns the function and the generic applies in order.
#[allow(dead_code)]
pub fn build_caller(
    module: &mut Module,
    name: &str,
    calls: &[(FuncRef, Vec<Ty>)],
) -> (FuncRef, Vec<InstRef>) {
    let g = module.add_function(name);
    let bb = module.append_block(g).unwrap();
    let v = module.append_inst(bb, InstKind::Argument(0), &[]).unwrap();
    module
        .append_inst(bb, InstKind::DebugValue("v".to_owned()), &[v])
        .unwrap();
    let addr = module
        .append_inst(bb, InstKind::AllocStack(uint16()), &[])
        .unwrap();
    module.append_inst(bb, InstKind::Store, &[v, addr]).unwrap();

    let mut applies = Vec::new();
    for (callee, subs) in calls {
        let fref = module
            .append_inst(bb, InstKind::FunctionRef(*callee), &[])
            .unwrap();
        let apply = module
            .append_inst(
                bb,
                InstKind::Apply(ApplySite::new(subs.iter().cloned())),
                &[fref, addr],
            )
            .unwrap();
        applies.push(apply);
    }

    module.append_inst(bb, InstKind::DeallocStack, &[addr]).unwrap();
    let ret_val = applies.last().cloned().unwrap_or(v);
    module.append_inst(bb, InstKind::Return, &[ret_val]).unwrap();
    (g, applies)
}

///All applies in `function` that call `callee` directly.
#[allow(dead_code)]
pub fn calls_to(module: &Module, function: FuncRef, callee: FuncRef) -> Vec<InstRef> {
    module
        .function_insts(function)
        .into_iter()
        .filter(|i| module.referenced_function(*i) == Some(callee))
        .collect()
}
