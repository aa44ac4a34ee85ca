use epinstr::{
    modules::{
        BasicBlock, Function, Module,
        control_flow::{Ret, Terminator},
        instructions::Instr,
        mem::MAlloca,
        misc::Phi,
        operand::{Label, Operand},
    },
    types::Type,
};
use eppass::{
    InstrumentConfig, InstrumentationPass, PassError,
    declare::{INIT_FUNCTION_NAME, LOG_FUNCTION_NAME, ensure_declared},
};

fn ret_void() -> Terminator {
    Terminator::Ret(Ret { value: None })
}

fn defined(name: &str) -> Function {
    let mut bb = BasicBlock::new(Label::ENTRY, ret_void());
    bb.instructions.push(
        MAlloca {
            dest: 0,
            ty: Type::I64,
        }
        .into(),
    );
    Function::new(name, vec![], None, vec![bb])
}

fn sample_unit() -> Module {
    let mut unit = Module::new("demo");
    for name in ["main", "foo", "bar", "baz"] {
        unit.define_function(defined(name));
    }
    unit
}

fn pass(targets: &[&str]) -> InstrumentationPass {
    InstrumentationPass::new(InstrumentConfig::new(targets.iter().copied()).unwrap())
}

fn expect_log_call(unit: &Module, instr: &Instr, expected: &str) {
    match instr {
        Instr::Call(call) => {
            assert_eq!(unit.symbol_name(call.function), Some(LOG_FUNCTION_NAME));
            assert_eq!(call.args.len(), 1);
            match &call.args[0] {
                Operand::Str(id) => assert_eq!(unit.str_value(*id), Some(expected)),
                other => panic!("expected a string operand, got {:?}", other),
            }
        }
        other => panic!("expected a call instruction, got {:?}", other),
    }
}

fn expect_init_call(unit: &Module, instr: &Instr) {
    match instr {
        Instr::Call(call) => {
            assert_eq!(unit.symbol_name(call.function), Some(INIT_FUNCTION_NAME));
            assert!(call.args.is_empty());
            assert_eq!(call.ty, Some(Type::I64));
            assert_eq!(call.dest, None);
        }
        other => panic!("expected a call instruction, got {:?}", other),
    }
}

fn init_call_count(unit: &Module) -> usize {
    unit.functions
        .iter()
        .flat_map(|f| f.blocks.iter())
        .flat_map(|bb| bb.instructions.iter())
        .filter(|instr| match instr {
            Instr::Call(call) => unit.symbol_name(call.function) == Some(INIT_FUNCTION_NAME),
            _ => false,
        })
        .count()
}

#[test]
fn scenario_targets_foo_and_bar() {
    let mut unit = sample_unit();
    let report = pass(&["foo", "bar"]).run(&mut unit).unwrap();

    assert_eq!(report.unit, "demo");
    assert_eq!(report.instrumented, vec!["foo", "bar"]);
    assert!(report.entry_initialized);

    for name in ["foo", "bar"] {
        let function = unit.function_by_name(name).unwrap();
        let entry = function.entry_block().unwrap();
        assert_eq!(entry.instructions.len(), 2);
        expect_log_call(&unit, &entry.instructions[0], name);
    }

    let main = unit.function_by_name("main").unwrap();
    let entry = main.entry_block().unwrap();
    assert_eq!(entry.instructions.len(), 2);
    expect_init_call(&unit, &entry.instructions[0]);

    let baz = unit.function_by_name("baz").unwrap();
    assert_eq!(baz.entry_block().unwrap().instructions.len(), 1);

    // Exactly one declaration per runtime routine.
    let log_decls = unit
        .external_functions
        .iter()
        .filter(|e| e.name == LOG_FUNCTION_NAME)
        .count();
    let init_decls = unit
        .external_functions
        .iter()
        .filter(|e| e.name == INIT_FUNCTION_NAME)
        .count();
    assert_eq!((log_decls, init_decls), (1, 1));

    unit.verify().unwrap();
}

#[test]
fn declarator_is_idempotent() {
    let mut unit = sample_unit();
    let first = ensure_declared(&mut unit).unwrap();
    let snapshot = unit.clone();
    let second = ensure_declared(&mut unit).unwrap();

    assert_eq!(first, second);
    assert_eq!(unit, snapshot);
    assert_eq!(unit.external_functions.len(), 2);
}

#[test]
fn unit_without_entry_gets_no_initializer() {
    let mut unit = Module::new("lib");
    unit.define_function(defined("foo"));
    unit.define_function(defined("helper"));

    let report = pass(&["foo"]).run(&mut unit).unwrap();

    assert!(!report.entry_initialized);
    assert_eq!(init_call_count(&unit), 0);
    unit.verify().unwrap();
}

#[test]
fn unmatched_target_names_are_inert() {
    let mut unit = Module::new("lib");
    unit.define_function(defined("foo"));

    let report = pass(&["foo", "lives_elsewhere"]).run(&mut unit).unwrap();
    assert_eq!(report.instrumented, vec!["foo"]);
}

#[test]
fn untargeted_functions_are_untouched() {
    let mut unit = sample_unit();
    let baz_before = unit.function_by_name("baz").unwrap().clone();
    let bar_before = unit.function_by_name("bar").unwrap().clone();

    pass(&["foo"]).run(&mut unit).unwrap();

    assert_eq!(unit.function_by_name("baz").unwrap(), &baz_before);
    assert_eq!(unit.function_by_name("bar").unwrap(), &bar_before);
}

#[test]
fn conflicting_external_declaration_aborts_unit() {
    let mut unit = sample_unit();
    // Wrong arity: the call-logger takes one pointer argument.
    unit.declare_external(LOG_FUNCTION_NAME, vec![], None);
    let snapshot = unit.clone();

    let err = pass(&["foo"]).run(&mut unit).unwrap_err();
    match err {
        PassError::SignatureConflict { unit: name, name: symbol, .. } => {
            assert_eq!(name, "demo");
            assert_eq!(symbol, LOG_FUNCTION_NAME);
        }
        other => panic!("expected a signature conflict, got {:?}", other),
    }

    // No insertions anywhere.
    assert_eq!(unit, snapshot);
}

#[test]
fn conflicting_defined_function_aborts_unit() {
    let mut unit = sample_unit();
    // A defined `init` returning void instead of i64.
    unit.define_function(defined(INIT_FUNCTION_NAME));
    let snapshot = unit.clone();

    let err = pass(&["foo"]).run(&mut unit).unwrap_err();
    assert!(matches!(err, PassError::SignatureConflict { .. }));
    assert_eq!(unit, snapshot);
}

#[test]
fn compatible_defined_logger_is_reused() {
    let mut unit = Module::new("demo");
    unit.define_function(Function::new(
        LOG_FUNCTION_NAME,
        vec![(0, Type::Ptr)],
        None,
        vec![BasicBlock::new(Label::ENTRY, ret_void())],
    ));
    unit.define_function(defined("foo"));

    pass(&["foo"]).run(&mut unit).unwrap();

    // The in-unit definition satisfies the declarator; no external is added.
    assert!(unit.external_by_name(LOG_FUNCTION_NAME).is_none());
    let foo = unit.function_by_name("foo").unwrap();
    expect_log_call(&unit, &foo.entry_block().unwrap().instructions[0], "foo");
    unit.verify().unwrap();
}

#[test]
fn entry_that_is_also_a_target_initializes_first() {
    let mut unit = sample_unit();
    pass(&["main", "foo"]).run(&mut unit).unwrap();

    let main = unit.function_by_name("main").unwrap();
    let entry = main.entry_block().unwrap();
    assert_eq!(entry.instructions.len(), 3);
    expect_init_call(&unit, &entry.instructions[0]);
    expect_log_call(&unit, &entry.instructions[1], "main");
    unit.verify().unwrap();
}

#[test]
fn injected_calls_land_after_leading_phis() {
    let mut unit = Module::new("demo");
    let mut bb = BasicBlock::new(Label::ENTRY, ret_void());
    bb.instructions.push(
        Phi {
            dest: 0,
            ty: Type::I64,
            values: vec![(Label::ENTRY, Operand::Reg(0))],
        }
        .into(),
    );
    unit.define_function(Function::new("main", vec![], None, vec![bb]));

    pass(&["main"]).run(&mut unit).unwrap();

    let entry = unit.function_by_name("main").unwrap().entry_block().unwrap();
    assert_eq!(entry.instructions.len(), 3);
    assert!(entry.instructions[0].is_phi());
    expect_init_call(&unit, &entry.instructions[1]);
    expect_log_call(&unit, &entry.instructions[2], "main");
    unit.verify().unwrap();
}

#[test]
fn entry_name_is_configurable() {
    let mut unit = Module::new("plugin");
    unit.define_function(defined("main"));
    unit.define_function(defined("module_start"));

    let config = InstrumentConfig::new(["module_start"])
        .unwrap()
        .with_entry_name("module_start");
    let report = InstrumentationPass::new(config).run(&mut unit).unwrap();

    assert!(report.entry_initialized);
    // `main` is just an ordinary function under this convention.
    let main = unit.function_by_name("main").unwrap();
    assert_eq!(main.entry_block().unwrap().instructions.len(), 1);

    let start = unit.function_by_name("module_start").unwrap();
    let entry = start.entry_block().unwrap();
    expect_init_call(&unit, &entry.instructions[0]);
    expect_log_call(&unit, &entry.instructions[1], "module_start");
}

#[test]
fn function_name_reuses_existing_interned_string() {
    let mut unit = Module::new("demo");
    unit.define_function(defined("foo"));
    // A pre-existing string constant identical to the function name.
    let existing = unit.intern_str("foo");

    pass(&["foo"]).run(&mut unit).unwrap();

    let foo = unit.function_by_name("foo").unwrap();
    match &foo.entry_block().unwrap().instructions[0] {
        Instr::Call(call) => assert_eq!(call.args[0], Operand::Str(existing)),
        other => panic!("expected a call instruction, got {:?}", other),
    }
}
