use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::StdFixture;
use crate::{GeneratorTarget, MarshalOptions};

fn void() -> TypeId {
    TypeId::of(Primitive::Void)
}

// ── Managed surface ─────────────────────────────────────────

#[test]
fn string_parameter_is_converted_and_cleaned_up() {
    let fx = StdFixture::new();
    let options = MarshalOptions::for_target(GeneratorTarget::Managed);
    let function = ForeignFunction::new("set_name", void()).with_param("name", fx.string);
    let body = FunctionMarshaller::new(fx.gen(&options)).marshal(&function).unwrap();

    assert_eq!(
        body.render(4),
        "var __allocator0 = new global::std.allocator<sbyte>();\n\
         var __basicString0 = global::std.basic_stringExtensions.basic_string(name, __allocator0);\n\
         set_name(*(global::std.basic_string.__Internal*) __basicString0.__Instance);\n\
         __basicString0.Dispose(false);\n\
         __allocator0.Dispose();\n"
    );
    assert_eq!(body.return_expr, None);
}

#[test]
fn string_return_uses_its_own_slot() {
    let fx = StdFixture::new();
    let options = MarshalOptions::for_target(GeneratorTarget::Managed);
    let function = ForeignFunction::new("greet", fx.string).with_param("times", fx.int());
    let body = FunctionMarshaller::new(fx.gen(&options)).marshal(&function).unwrap();

    assert_eq!(body.call, "var __ret = greet(times);");
    assert_eq!(
        body.render(4),
        "var __ret = greet(times);\n\
         var __basicStringRet1 = global::std.basic_string<sbyte, global::std.char_traits<sbyte>, global::std.allocator<sbyte>>.__CreateInstance(__ret);\n\
         var __stringRet1 = global::std.basic_stringExtensions.c_str(__basicStringRet1);\n\
         __basicStringRet1.Dispose(false);\n\
         return __stringRet1;\n"
    );
}

#[test]
fn string_round_trip_through_one_function() {
    let fx = StdFixture::new();
    let options = MarshalOptions::for_target(GeneratorTarget::Managed);
    let function = ForeignFunction::new("echo", fx.string).with_param("s", fx.string);
    let body = FunctionMarshaller::new(fx.gen(&options)).marshal(&function).unwrap();

    assert_eq!(
        body.render(4),
        "var __allocator0 = new global::std.allocator<sbyte>();\n\
         var __basicString0 = global::std.basic_stringExtensions.basic_string(s, __allocator0);\n\
         var __ret = echo(*(global::std.basic_string.__Internal*) __basicString0.__Instance);\n\
         var __basicStringRet1 = global::std.basic_string<sbyte, global::std.char_traits<sbyte>, global::std.allocator<sbyte>>.__CreateInstance(__ret);\n\
         var __stringRet1 = global::std.basic_stringExtensions.c_str(__basicStringRet1);\n\
         __basicStringRet1.Dispose(false);\n\
         __basicString0.Dispose(false);\n\
         __allocator0.Dispose();\n\
         return __stringRet1;\n"
    );
    assert_eq!(
        body.cleanup.lines().collect::<Vec<_>>(),
        vec!["__basicString0.Dispose(false);", "__allocator0.Dispose();"]
    );
    assert_eq!(body.return_expr.as_deref(), Some("__stringRet1"));
}

#[test]
fn cleanup_follows_parameter_order() {
    let fx = StdFixture::new();
    let options = MarshalOptions::for_target(GeneratorTarget::Managed);
    let function = ForeignFunction::new("join", void())
        .with_param("a", fx.string)
        .with_param("b", fx.string);
    let body = FunctionMarshaller::new(fx.gen(&options)).marshal(&function).unwrap();

    assert_eq!(
        body.cleanup.lines().collect::<Vec<_>>(),
        vec![
            "__basicString0.Dispose(false);",
            "__allocator0.Dispose();",
            "__basicString1.Dispose(false);",
            "__allocator1.Dispose();",
        ]
    );
}

// ── Native-adjacent surface ─────────────────────────────────

#[test]
fn passthrough_parameters_collect_includes() {
    let fx = StdFixture::new();
    let options = MarshalOptions::for_target(GeneratorTarget::NativeAdjacent);
    let function = ForeignFunction::new("reset", void())
        .with_param("p", fx.nullptr_t)
        .with_param("q", fx.nullptr_t);
    let body = FunctionMarshaller::new(fx.gen(&options)).marshal(&function).unwrap();

    assert_eq!(body.call, "reset(p, q);");
    assert_eq!(body.includes, vec![Include::angled("cstddef")]);
    assert!(body.setup.is_empty());
}

#[test]
fn unmapped_return_is_returned_directly() {
    let fx = StdFixture::new();
    let options = MarshalOptions::for_target(GeneratorTarget::NativeAdjacent);
    let function = ForeignFunction::new("count", fx.int()).with_param("s", fx.string);
    let body = FunctionMarshaller::new(fx.gen(&options)).marshal(&function).unwrap();

    assert_eq!(
        body.render(4),
        "auto __ret = count(clix::marshalString<clix::E_UTF8>(s));\nreturn __ret;\n"
    );
}

// ── Dropped declarations ────────────────────────────────────

#[test]
fn ignored_parameter_drops_the_declaration() {
    let fx = StdFixture::new();
    let options = MarshalOptions::default();
    let function = ForeignFunction::new("leak", void())
        .with_param("s", fx.string)
        .with_param("secret", fx.secret);
    let err = FunctionMarshaller::new(fx.gen(&options))
        .marshal(&function)
        .unwrap_err();
    assert_eq!(err, MarshalError::UnsupportedType { ty: "app::Secret".into() });
}

#[test]
fn ignored_container_return_drops_the_declaration() {
    let mut fx = StdFixture::new();
    let int = fx.int();
    let map = fx.map_of(int, int);
    let options = MarshalOptions::for_target(GeneratorTarget::NativeAdjacent);
    let function = ForeignFunction::new("lookup", map);
    let err = FunctionMarshaller::new(fx.gen(&options))
        .marshal(&function)
        .unwrap_err();
    assert_eq!(err, MarshalError::UnsupportedType { ty: "std::map<int, int>".into() });
}

// ── Property tests ──────────────────────────────────────────

mod proptest_slots {
    use proptest::prelude::*;
    use rustc_hash::FxHashSet;

    use super::{void, StdFixture};
    use crate::{ForeignFunction, FunctionMarshaller, GeneratorTarget, MarshalOptions};

    proptest! {
        #[test]
        fn string_parameters_get_distinct_temporaries(count in 1usize..=8) {
            let fx = StdFixture::new();
            let options = MarshalOptions::for_target(GeneratorTarget::Managed);
            let function = (0..count).fold(ForeignFunction::new("many", void()), |f, i| {
                f.with_param(format!("s{i}"), fx.string)
            });
            let body = FunctionMarshaller::new(fx.gen(&options))
                .marshal(&function)
                .unwrap();

            let allocators: FxHashSet<&str> = body
                .setup
                .lines()
                .filter_map(|line| line.strip_prefix("var "))
                .filter_map(|line| line.split(' ').next())
                .collect();
            prop_assert_eq!(allocators.len(), count * 2);
            prop_assert_eq!(body.cleanup.len(), count * 2);
        }
    }
}
