use gir::{ApplySite, InstKind, Module, Ty};
use gir_opt::{engine::DeadSet, passes::generic_specializer::drain, worklist::WorkSet};
use smallvec::smallvec;
use test_engine::{define_generic, uint16};

mod test_engine;

#[test]
fn never_deletes_across_functions() {
    //the callee reference of the dead call lives in another function
    let mut module = Module::new("locality");
    let f = define_generic(&mut module, "f");
    let h = module.add_function("h");
    let hbb = module.append_block(h).unwrap();
    let foreign_ref = module
        .append_inst(hbb, InstKind::FunctionRef(f), &[])
        .unwrap();

    let g = module.add_function("g");
    let bb = module.append_block(g).unwrap();
    let call = module
        .append_inst(bb, InstKind::Apply(ApplySite::new([uint16()])), &[foreign_ref])
        .unwrap();

    let mut applies = WorkSet::new();
    applies.insert(call);
    let mut dead: DeadSet = smallvec![call];
    let deleted = drain(&mut module, g, &mut dead, &mut applies);

    assert_eq!(deleted, 1);
    assert!(dead.is_empty());
    assert!(applies.is_empty());
    assert!(module.inst(call).is_none());
    assert!(module.contains_inst(foreign_ref));
    assert_eq!(module[hbb].insts(), &[foreign_ref]);
}

#[test]
fn deletes_dead_producer_chain() {
    let mut module = Module::new("chain");
    let f = define_generic(&mut module, "f");
    let g = module.add_function("g");
    let bb = module.append_block(g).unwrap();
    let addr = module
        .append_inst(bb, InstKind::AllocStack(Ty::named("Ptr")), &[])
        .unwrap();
    let load0 = module.append_inst(bb, InstKind::Load, &[addr]).unwrap();
    let load1 = module.append_inst(bb, InstKind::Load, &[load0]).unwrap();
    let fref = module.append_inst(bb, InstKind::FunctionRef(f), &[]).unwrap();
    let call = module
        .append_inst(bb, InstKind::Apply(ApplySite::new([uint16()])), &[fref, load1])
        .unwrap();
    //keeps addr alive
    let dealloc = module.append_inst(bb, InstKind::DeallocStack, &[addr]).unwrap();

    let mut applies = WorkSet::new();
    applies.insert(call);
    let mut dead: DeadSet = smallvec![call];
    let deleted = drain(&mut module, g, &mut dead, &mut applies);

    assert_eq!(deleted, 4);
    assert_eq!(module[bb].insts(), &[addr, dealloc]);
    assert_eq!(module[addr].use_count(), 1);
}

#[test]
fn removes_every_deleted_instruction_from_work_set() {
    let mut module = Module::new("workset");
    let f = define_generic(&mut module, "f");
    let g = module.add_function("g");
    let bb = module.append_block(g).unwrap();
    let fref = module.append_inst(bb, InstKind::FunctionRef(f), &[]).unwrap();
    let first = module
        .append_inst(bb, InstKind::Apply(ApplySite::new([uint16()])), &[fref])
        .unwrap();
    let second = module
        .append_inst(bb, InstKind::Apply(ApplySite::new([uint16()])), &[fref])
        .unwrap();
    let third = module
        .append_inst(bb, InstKind::Apply(ApplySite::new([uint16()])), &[fref])
        .unwrap();

    let mut applies = WorkSet::new();
    applies.extend([first, second, third, fref]);
    //the engine made a later apply dead as well
    let mut dead: DeadSet = smallvec![first, second];
    let deleted = drain(&mut module, g, &mut dead, &mut applies);

    assert_eq!(deleted, 2);
    assert_eq!(applies.iter().cloned().collect::<Vec<_>>(), vec![third, fref]);
    //no entry names a freed instruction
    assert!(applies.iter().all(|i| module.contains_inst(*i)));

    let mut dead: DeadSet = smallvec![third];
    let deleted = drain(&mut module, g, &mut dead, &mut applies);
    //fref died with the last call, and left the set too
    assert_eq!(deleted, 2);
    assert!(applies.is_empty());
    assert!(module[bb].insts().is_empty());
}

#[test]
fn still_used_entries_are_retried() {
    let mut module = Module::new("retry");
    let f = define_generic(&mut module, "f");
    let g = module.add_function("g");
    let bb = module.append_block(g).unwrap();
    let addr = module
        .append_inst(bb, InstKind::AllocStack(uint16()), &[])
        .unwrap();
    let scratch = module.append_inst(bb, InstKind::Load, &[addr]).unwrap();
    let fref = module.append_inst(bb, InstKind::FunctionRef(f), &[]).unwrap();
    let call = module
        .append_inst(bb, InstKind::Apply(ApplySite::new([uint16()])), &[fref, scratch])
        .unwrap();
    let store = module.append_inst(bb, InstKind::Store, &[scratch, addr]).unwrap();

    //scratch is popped first, while call and store still use it
    let mut applies = WorkSet::new();
    let mut dead: DeadSet = smallvec![call, store, scratch];
    let deleted = drain(&mut module, g, &mut dead, &mut applies);

    assert_eq!(deleted, 5);
    assert!(module[bb].insts().is_empty());
}

#[test]
fn entries_that_stay_used_are_kept() {
    let mut module = Module::new("kept");
    let g = module.add_function("g");
    let bb = module.append_block(g).unwrap();
    let lit = module.append_inst(bb, InstKind::Literal(3), &[]).unwrap();
    let ret = module.append_inst(bb, InstKind::Return, &[lit]).unwrap();

    let mut applies = WorkSet::new();
    applies.insert(lit);
    let mut dead: DeadSet = smallvec![lit];
    let deleted = drain(&mut module, g, &mut dead, &mut applies);

    assert_eq!(deleted, 0);
    assert!(applies.is_empty());
    assert_eq!(module[bb].insts(), &[lit, ret]);
}

#[test]
fn entries_of_other_functions_are_dropped() {
    let mut module = Module::new("foreign");
    let h = module.add_function("h");
    let hbb = module.append_block(h).unwrap();
    let foreign = module.append_inst(hbb, InstKind::Literal(1), &[]).unwrap();
    let g = module.add_function("g");
    let bb = module.append_block(g).unwrap();
    let local = module.append_inst(bb, InstKind::Literal(2), &[]).unwrap();

    let mut applies = WorkSet::new();
    let mut dead: DeadSet = smallvec![local, foreign];
    let deleted = drain(&mut module, g, &mut dead, &mut applies);

    assert_eq!(deleted, 1);
    assert!(dead.is_empty());
    assert!(module.contains_inst(foreign));
    assert!(!module.contains_inst(local));
}
