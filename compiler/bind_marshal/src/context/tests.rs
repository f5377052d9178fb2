use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::StdFixture;

#[test]
fn slot_counter_is_monotonic() {
    let mut slots = SlotCounter::new();
    let a = slots.next_slot();
    let b = slots.next_slot();
    assert!(a < b);
    assert_eq!(a.raw(), 0);
    assert_eq!(b.to_string(), "1");
    assert_eq!(slots.issued(), 2);
    assert_eq!(SlotIndex::new(7).raw(), 7);
}

#[test]
fn shape_sees_through_typedefs() {
    let mut fx = StdFixture::new();
    let by_ptr = fx.ast.pointer(fx.string);
    let by_ref = fx.ast.const_reference(fx.string);
    let aliased = fx.ast.typedef(fx.inline_ns, "string_ref", by_ref);
    let options = MarshalOptions::default();
    let gen = fx.gen(&options);

    let shape = |ty| MarshalContext::parameter(gen, ty, "s", SlotIndex::new(0)).shape();
    assert_eq!(shape(fx.string), ParamShape::ByValue);
    assert_eq!(shape(by_ptr), ParamShape::ByPointer);
    assert_eq!(shape(by_ref), ParamShape::ByReference);
    assert_eq!(shape(aliased), ParamShape::ByReference);
}

#[test]
fn return_context_uses_configured_variable() {
    let fx = StdFixture::new();
    let options = MarshalOptions::default().with_return_var("result");
    let ctx = MarshalContext::return_value(fx.gen(&options), fx.string, SlotIndex::new(3));
    assert_eq!(ctx.name, "result");
    assert_eq!(ctx.site, Site::Return);
    assert_eq!(ctx.options().return_var, "result");
    assert!(ctx.buffers.is_empty());
}

#[test]
fn element_contexts_share_the_slot_and_go_one_level_deeper() {
    let mut fx = StdFixture::new();
    let int = fx.int();
    let vec = fx.vector_of(int);
    let options = MarshalOptions::default();
    let parent = MarshalContext::field(fx.gen(&options), vec, "items", SlotIndex::new(2));
    assert_eq!(parent.site, Site::Field);
    assert_eq!(parent.depth_suffix(), "");

    let child = parent.element(int, "_element", Direction::ToHost);
    assert_eq!(child.slot, parent.slot);
    assert_eq!(child.depth, 1);
    assert_eq!(child.site, Site::Return);
    assert_eq!(child.depth_suffix(), "1");
    assert!(std::ptr::eq(child.ast(), parent.ast()));

    let grandchild = child.element(int, "_element1", Direction::ToForeign);
    assert_eq!(grandchild.site, Site::Parameter);
    assert_eq!(grandchild.depth_suffix(), "2");
}

#[test]
fn generation_context_helpers() {
    let fx = StdFixture::new();
    let options = MarshalOptions::for_target(GeneratorTarget::NativeAdjacent);
    let gen = fx.gen(&options);
    assert_eq!(gen.target(), GeneratorTarget::NativeAdjacent);
    assert_eq!(gen.mapping_for(fx.string), Some(TypeMapping::String));
    assert_eq!(gen.native_name(fx.string), "std::string");
    assert!(gen.ignore_checker().is_ignored(fx.secret));
    assert_eq!(gen.host_printer().print(fx.widget), "app::Widget^");
}
