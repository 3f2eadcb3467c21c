use pretty_assertions::assert_eq;

use mend_test_utils::{extract_cursor, extract_range};

use crate::{
    expand_bodies, parse, parse_with_cursor, print_unit, AssistInfo, AssistKind, Block, Body,
    BodyExpander, CompilationUnit, CursorSpec, DeclPath, Expr, InvalidCursorLocation,
    JavaLanguageLevel, Member, ParseOptions, Stmt, TextRange,
};

fn print_diet(text: &str) -> String {
    print_unit(&parse(text, &ParseOptions::diet()))
}

fn print_full(text: &str) -> String {
    print_unit(&parse(text, &ParseOptions::full()))
}

fn print_expanded(text: &str) -> String {
    let options = ParseOptions::diet();
    let mut unit = parse(text, &options);
    expand_bodies(&mut unit, text, &options);
    print_unit(&unit)
}

fn method_body<'a>(unit: &'a CompilationUnit, name: &str) -> &'a Block {
    let method = unit.types[0]
        .methods()
        .find(|method| method.name.text == name)
        .unwrap_or_else(|| panic!("no method `{name}`"));
    match &method.body {
        Body::Parsed(block) => block,
        other => panic!("body of `{name}` not parsed: {other:?}"),
    }
}

fn complete(fixture: &str, options: &ParseOptions) -> (String, AssistInfo) {
    let (text, offset) = extract_cursor(fixture);
    let parsed = parse_with_cursor(&text, options, CursorSpec::Completion(offset as u32))
        .expect("valid cursor location");
    let info = parsed.assist.expect("assist node placed");
    (text, info)
}

fn replaced_text(text: &str, info: &AssistInfo) -> String {
    text[info.replaced.start as usize..info.replaced.end as usize].to_owned()
}

// --- literal scenarios ---

#[test]
fn annotation_type_without_body_gets_braces_in_every_mode() {
    let text = "package a;\npublic @interface X\n}\n";
    let expected = "package a;\npublic @interface X {\n}\n";
    assert_eq!(print_diet(text), expected);
    assert_eq!(print_expanded(text), expected);
    assert_eq!(print_full(text), expected);
}

#[test]
fn annotation_value_cut_off_prints_missing_placeholder() {
    let text = "@AnAnnotation(name=)\npublic class X {\n}\n";
    let expected = "public @AnAnnotation(name = $missing$) class X {\n  public X() {\n  }\n}\n";
    assert_eq!(print_diet(text), expected);
    assert_eq!(print_expanded(text), expected);
    assert_eq!(print_full(text), expected);
    assert!(parse(text, &ParseOptions::full()).has_problems());
}

#[test]
fn completion_parse_drops_annotation_needing_recovery() {
    let text = "@AnAnnotation(name=)\npublic class X {\n}\n";
    let parsed = parse_with_cursor(
        text,
        &ParseOptions::diet(),
        CursorSpec::Completion(text.len() as u32 + 1),
    )
    .unwrap();
    assert_eq!(parsed.assist, None);
    assert_eq!(
        print_unit(&parsed.unit),
        "public class X {\n  public X() {\n  }\n}\n"
    );
}

#[test]
fn completion_after_dot_is_a_name_with_empty_partial() {
    let fixture = "public class X {\n  void foo() {\n    String s = \"hello\";\n    s.$0\n  }\n}\n";
    for options in [ParseOptions::diet(), ParseOptions::full()] {
        let (text, info) = complete(fixture, &options);
        assert_eq!(info.kind, AssistKind::Name);
        assert_eq!(info.partial, "");
        assert_eq!(replaced_text(&text, &info), "s.");
        assert_eq!(info.printed, "<CompleteOnName:s.>");
        assert_eq!(
            info.enclosing,
            DeclPath {
                types: vec![0],
                member: Some(0),
            }
        );
    }

    let (text, offset) = extract_cursor(fixture);
    let parsed =
        parse_with_cursor(&text, &ParseOptions::diet(), CursorSpec::Completion(offset as u32))
            .unwrap();
    assert_eq!(
        print_unit(&parsed.unit),
        "public class X {\n  public X() {\n  }\n  void foo() {\n    String s = \"hello\";\n    <CompleteOnName:s.>;\n  }\n}\n"
    );
}

#[test]
fn selection_on_superclass_is_a_type_reference() {
    let (text, range) = extract_range("public class X extends /*start*/IOException/*end*/ {}");
    let parsed = parse_with_cursor(
        &text,
        &ParseOptions::full(),
        CursorSpec::Selection(TextRange::new(range.start, range.end)),
    )
    .unwrap();
    let info = parsed.assist.clone().unwrap();
    assert_eq!(info.kind, AssistKind::Type);
    assert_eq!(info.printed, "<SelectOnType:IOException>");
    assert_eq!(replaced_text(&text, &info), "IOException");
    assert_eq!(
        print_unit(&parsed.unit),
        "public class X extends <SelectOnType:IOException> {\n  public X() {\n    super();\n  }\n}\n"
    );
}

#[test]
fn cursor_inside_number_literal_is_rejected() {
    let (text, offset) =
        extract_cursor("public class X {\n  public static final int Source = 5$0;\n}\n");
    let err = parse_with_cursor(&text, &ParseOptions::diet(), CursorSpec::Completion(offset as u32))
        .unwrap_err();
    assert_eq!(err, InvalidCursorLocation::NumberLiteral);
    assert_eq!(err.code(), "NO_COMPLETION_INSIDE_NUMBER");
}

#[test]
fn cursor_inside_javadoc_is_rejected() {
    let (text, offset) =
        extract_cursor("public class X {\n  /** Retu$0rns x. */\n  int x() { return 1; }\n}\n");
    let err = parse_with_cursor(&text, &ParseOptions::full(), CursorSpec::Completion(offset as u32))
        .unwrap_err();
    assert_eq!(err, InvalidCursorLocation::Comment);
    assert_eq!(err.code(), "NO_COMPLETION_INSIDE_COMMENT");
}

#[test]
fn invalid_locations_are_rejected_in_broken_code() {
    let (text, offset) = extract_cursor("class X { void m( { int a = 12$03 ");
    assert_eq!(
        parse_with_cursor(&text, &ParseOptions::full(), CursorSpec::Completion(offset as u32)),
        Err(InvalidCursorLocation::NumberLiteral)
    );

    let (text, offset) = extract_cursor("class X { /* never clo$0sed");
    assert_eq!(
        parse_with_cursor(&text, &ParseOptions::diet(), CursorSpec::Completion(offset as u32)),
        Err(InvalidCursorLocation::Comment)
    );
}

// --- diet, full and expansion ---

const SAMPLE: &str = r#"package p;

import java.util.List;

public class Sample<T extends Comparable<T>> implements Runnable {
  private int count = 0;

  static {
    count();
  }

  public Sample(int start) {
    this.count = start;
  }

  public void run() {
    for (int i = 0, j = 10; i < j; i++) {
      count += i;
    }
    if (count > 3) return; else count--;
    try {
      work();
    } catch (IllegalStateException | IllegalArgumentException e) {
      throw e;
    } finally {
      done();
    }
    switch (count) {
      case 1:
      case 2:
        break;
      default:
        count = 0;
    }
    Runnable r = new Runnable() {
      public void run() {}
    };
    int[] values = new int[] {1, 2, 3};
    String s = values.length > 0 ? "a" : "b";
  }
}
"#;

#[test]
fn diet_plus_expansion_matches_full_parse() {
    let full = parse(SAMPLE, &ParseOptions::full());
    assert_eq!(full.problems, Vec::new());
    assert_eq!(print_expanded(SAMPLE), print_unit(&full));
}

#[test]
fn reprinting_is_idempotent() {
    let once = print_full(SAMPLE);
    let twice = print_full(&once);
    assert_eq!(twice, once);
    assert!(!parse(&once, &ParseOptions::full()).has_problems());
}

#[test]
fn canonical_form_of_statements() {
    let printed = print_full(SAMPLE);
    assert!(printed.contains("    for (int i = 0, j = 10; (i < j); i++) {\n      count += i;\n    }\n"));
    assert!(printed.contains("    if ((count > 3))\n      return;\n    else\n      count--;\n"));
    assert!(printed.contains(
        "    } catch (IllegalStateException | IllegalArgumentException e) {\n      throw e;\n    } finally {\n"
    ));
    assert!(printed.contains(
        "    switch (count) {\n      case 1:\n      case 2:\n        break;\n      default:\n        count = 0;\n    }\n"
    ));
    assert!(printed.contains("    int[] values = new int[]{1, 2, 3};\n"));
    assert!(printed.contains("    String s = ((values.length > 0) ? \"a\" : \"b\");\n"));
    assert!(printed.contains("  public Sample(int start) {\n    super();\n    this.count = start;\n  }\n"));
}

#[test]
fn diet_leaves_bodies_opaque() {
    let unit = parse(SAMPLE, &ParseOptions::diet());
    assert!(!unit.bodies_parsed);
    let ty = &unit.types[0];
    assert!(ty.methods().all(|method| method.body.is_opaque()));
    assert!(ty.constructors().all(|ctor| ctor.body.is_opaque()));
    assert_eq!(ty.fields().count(), 1);
}

#[test]
fn expander_handles_a_single_type() {
    let options = ParseOptions::diet();
    let mut unit = parse(SAMPLE, &options);
    let mut expander = BodyExpander::new(SAMPLE, &options);
    expander.expand_type(&mut unit.types[0]);
    assert!(expander.problems().is_empty());
    assert!(unit.types[0]
        .methods()
        .all(|method| matches!(method.body, Body::Parsed(_))));
    let run = method_body(&unit, "run");
    assert_eq!(run.stmts.len(), 7);
}

#[test]
fn implicit_super_call_needs_parsed_bodies() {
    let text = "class A {\n  A() {\n    int x = 1;\n  }\n}\n";
    assert_eq!(print_diet(text), "class A {\n  A() {\n  }\n}\n");
    let full = "class A {\n  A() {\n    super();\n    int x = 1;\n  }\n}\n";
    assert_eq!(print_full(text), full);
    assert_eq!(print_expanded(text), full);
}

#[test]
fn explicit_constructor_call_suppresses_implicit_super() {
    let text = "class A {\n  A(int x) {\n  }\n  A() {\n    this(1);\n  }\n}\n";
    assert_eq!(
        print_full(text),
        "class A {\n  A(int x) {\n    super();\n  }\n  A() {\n    this(1);\n  }\n}\n"
    );
}

#[test]
fn member_types_print_first() {
    let text = "class A {\n  int x;\n  class B {\n  }\n}\n";
    assert_eq!(
        print_full(text),
        "class A {\n  class B {\n    B() {\n      super();\n    }\n  }\n  int x;\n  A() {\n    super();\n  }\n}\n"
    );
}

#[test]
fn enums_and_interfaces() {
    assert_eq!(
        print_full("enum Color { RED, GREEN; }"),
        "enum Color {\n  RED,\n  GREEN;\n  private Color() {\n  }\n}\n"
    );
    assert_eq!(
        print_full("interface I {\n  void run();\n}\n"),
        "interface I {\n  void run();\n}\n"
    );
}

// --- recovery ---

#[test]
fn unterminated_body_closes_at_next_member() {
    let text = "class X {\n  void a() {\n    foo();\n  public int h;\n}\n";
    assert_eq!(
        print_full(text),
        "class X {\n  public int h;\n  X() {\n    super();\n  }\n  void a() {\n    foo();\n  }\n}\n"
    );
    assert_eq!(
        print_diet(text),
        "class X {\n  public int h;\n  X() {\n  }\n  void a() {\n  }\n}\n"
    );
    assert_eq!(print_expanded(text), print_full(text));
    assert_eq!(
        parse(text, &ParseOptions::diet()).problems,
        parse(text, &ParseOptions::full()).problems
    );
}

#[test]
fn dangling_identifier_becomes_field_without_name() {
    assert_eq!(
        print_full("class X {\n  foo\n}\n"),
        "class X {\n  foo;\n  X() {\n    super();\n  }\n}\n"
    );
}

#[test]
fn truncated_method_header_becomes_field() {
    assert_eq!(
        print_full("class X {\n  public void setP\n  public int y;\n}\n"),
        "class X {\n  public void setP;\n  public int y;\n  X() {\n    super();\n  }\n}\n"
    );
}

#[test]
fn method_header_ends_parameter_list() {
    assert_eq!(
        print_full("class X {\n  int foo(int bar(\n}\n"),
        "class X {\n  X() {\n    super();\n  }\n  int foo() {\n  }\n  int bar() {\n  }\n}\n"
    );
}

#[test]
fn statements_recovery_switch() {
    let text = "class X {\n  void m() {\n    int x = ;\n    foo();\n  }\n}\n";
    assert_eq!(
        print_full(text),
        "class X {\n  X() {\n    super();\n  }\n  void m() {\n    int x = $missing$;\n    foo();\n  }\n}\n"
    );

    let options = ParseOptions {
        statements_recovery: false,
        ..ParseOptions::full()
    };
    let unit = parse(text, &options);
    assert!(unit.has_problems());
    assert_eq!(
        print_unit(&unit),
        "class X {\n  X() {\n    super();\n  }\n  void m() {\n  }\n}\n"
    );
}

const OPEN_METHOD: &str = "package a;
import java.lang.*;
import java.util.*;

public class X {
  void foo() {
    System.out.println();

  public int h;
  public int[] i = { 0, 1 };

  void bar(){
  void baz(){
  }
}
";

const OPEN_METHOD_FULL: &str = "package a;
import java.lang.*;
import java.util.*;
public class X {
  public int h;
  public int[] i = {0, 1};
  public X() {
    super();
  }
  void foo() {
    System.out.println();
  }
  void bar() {
  }
  void baz() {
  }
}
";

#[test]
fn closed_local_class_does_not_end_the_enclosing_type() {
    let text = "package a;
import java.lang.*;
import java.util.*;

public class X {
  void foo() {
    System.out.println();

    class L {
      void baz(){}
    }

  public int h;
  public int[] i = { 0, 1 };

  void bar(){
  void truc(){
}
";
    assert_eq!(
        print_diet(text),
        "package a;
import java.lang.*;
import java.util.*;
public class X {
  public int h;
  public int[] i = {0, 1};
  public X() {
  }
  void foo() {
  }
  void bar() {
  }
  void truc() {
  }
}
"
    );

    let unit = parse(text, &ParseOptions::full());
    let [Stmt::Expr(_), Stmt::LocalType(local)] = &method_body(&unit, "foo").stmts[..] else {
        panic!("expected the call and the local class in `foo`");
    };
    assert_eq!(local.name.text, "L");
    assert_eq!(local.methods().count(), 1);
    assert!(unit.types[0].methods().all(|method| method.name.text != "baz"));
}

#[test]
fn body_error_keeps_implicit_super_of_its_class() {
    assert_eq!(print_expanded(OPEN_METHOD), OPEN_METHOD_FULL);
    assert_eq!(print_full(OPEN_METHOD), OPEN_METHOD_FULL);
    let unit = parse(OPEN_METHOD, &ParseOptions::full());
    assert!(unit.has_problems());
    assert!(!unit.types[0].header_recovered);
}

#[test]
fn body_cut_by_next_member_survives_without_statements_recovery() {
    let options = ParseOptions {
        statements_recovery: false,
        ..ParseOptions::full()
    };
    assert_eq!(print_unit(&parse(OPEN_METHOD, &options)), OPEN_METHOD_FULL);

    let options = ParseOptions {
        statements_recovery: false,
        ..ParseOptions::diet()
    };
    let mut unit = parse(OPEN_METHOD, &options);
    expand_bodies(&mut unit, OPEN_METHOD, &options);
    assert_eq!(print_unit(&unit), OPEN_METHOD_FULL);
}

#[test]
fn truncated_annotation_arguments_keep_the_declaration() {
    let text = "@A(x=1, y=2, \nclass X { void m() {} }";
    let expected = "@A(x = 1, y = 2) class X {\n  X() {\n  }\n  void m() {\n  }\n}\n";
    assert_eq!(print_diet(text), expected);
    assert_eq!(print_full(text), expected);
    let unit = parse(text, &ParseOptions::diet());
    assert_eq!(unit.types.len(), 1);
    assert!(unit.types[0].header_recovered);
}

#[test]
fn malformed_parameter_annotation_is_dropped() {
    let text = "class X { void foo(@Ann( int x) { bar(); } void baz() {} }";
    let expected =
        "class X {\n  X() {\n    super();\n  }\n  void foo(int x) {\n    bar();\n  }\n  void baz() {\n  }\n}\n";
    assert_eq!(print_full(text), expected);
    assert_eq!(print_expanded(text), expected);
    assert_eq!(
        print_diet(text),
        "class X {\n  X() {\n  }\n  void foo(int x) {\n  }\n  void baz() {\n  }\n}\n"
    );

    assert_eq!(
        print_full("class X { void foo(@Ann(1) int x) {} }"),
        "class X {\n  X() {\n    super();\n  }\n  void foo(@Ann(1) int x) {\n  }\n}\n"
    );
}

// --- language levels ---

#[test]
fn assert_is_an_identifier_before_1_4() {
    let text = "class X {\n  void m() {\n    assert ready;\n  }\n}\n";

    let old = parse(text, &ParseOptions::full().with_level(JavaLanguageLevel::JAVA_1_3));
    assert!(!old.has_problems());
    assert!(matches!(method_body(&old, "m").stmts[..], [Stmt::LocalVar(_)]));

    let new = parse(text, &ParseOptions::full().with_level(JavaLanguageLevel::JAVA_1_4));
    assert!(!new.has_problems());
    assert!(matches!(method_body(&new, "m").stmts[..], [Stmt::Assert { .. }]));
}

#[test]
fn generics_are_gated_at_1_5() {
    let text = "class X {\n  List<String> names;\n}\n";
    let old = parse(text, &ParseOptions::full().with_level(JavaLanguageLevel::JAVA_1_4));
    assert!(old.problems[0].message.contains("[JAVA_FEATURE_GENERICS]"));
    assert!(!parse(text, &ParseOptions::full().with_level(JavaLanguageLevel::JAVA_1_5)).has_problems());
}

#[test]
fn lambdas_are_gated_at_1_8() {
    let text = "class X {\n  Runnable r = () -> run();\n}\n";
    let old = parse(text, &ParseOptions::full().with_level(JavaLanguageLevel::JAVA_1_7));
    assert!(old
        .problems
        .iter()
        .any(|problem| problem.message.contains("[JAVA_FEATURE_LAMBDAS]")));
    assert!(!parse(text, &ParseOptions::full()).has_problems());
}

// --- assist kinds ---

#[test]
fn keyword_after_try_statement() {
    let fixture = "class X {\n  void m() {\n    try {\n    } catch (Exception e) {\n    }\n    fin$0\n  }\n}\n";
    let (_, info) = complete(fixture, &ParseOptions::diet());
    assert_eq!(info.kind, AssistKind::Keyword);
    assert_eq!(info.partial, "fin");
    assert_eq!(info.printed, "<CompleteOnKeyword:fin>");
}

#[test]
fn keyword_in_class_header() {
    let (_, info) = complete("class X ext$0 {}", &ParseOptions::diet());
    assert_eq!(info.kind, AssistKind::Keyword);
    assert_eq!(info.printed, "<CompleteOnKeyword:ext>");
}

#[test]
fn multi_catch_alternative_keeps_siblings() {
    let fixture =
        "class X {\n  void m() {\n    try {\n    } catch (IOException | Fil$0 e) {\n    }\n  }\n}\n";
    let (text, offset) = extract_cursor(fixture);
    let parsed =
        parse_with_cursor(&text, &ParseOptions::full(), CursorSpec::Completion(offset as u32))
            .unwrap();
    let info = parsed.assist.clone().unwrap();
    assert_eq!(info.kind, AssistKind::MultiCatchException);
    assert_eq!(info.printed, "<CompleteOnException:Fil>");
    let [Stmt::Try { catches, .. }] = &method_body(&parsed.unit, "m").stmts[..] else {
        panic!("expected a single try statement");
    };
    assert_eq!(catches[0].types.len(), 2);
    assert_eq!(catches[0].name.text(), "e");
}

#[test]
fn import_completion_replaces_whole_path() {
    let (text, info) = complete("import java.ut$0il.List;\nclass X {}\n", &ParseOptions::diet());
    assert_eq!(info.kind, AssistKind::Import);
    assert_eq!(info.partial, "ut");
    assert_eq!(replaced_text(&text, &info), "java.util.List");
    assert_eq!(info.printed, "<CompleteOnImport:java.ut>");
    assert_eq!(info.enclosing, DeclPath::default());
}

#[test]
fn member_access_on_this() {
    let fixture = "class X {\n  int f;\n  void m() {\n    this.f$0\n  }\n}\n";
    let (text, info) = complete(fixture, &ParseOptions::diet());
    assert_eq!(info.kind, AssistKind::MemberAccess);
    assert_eq!(info.printed, "<CompleteOnMemberAccess:this.f>");
    assert_eq!(replaced_text(&text, &info), "f");
}

#[test]
fn empty_argument_list_is_a_message_send() {
    let fixture = "class X {\n  void m() {\n    foo.bar($0);\n  }\n}\n";
    let (_, info) = complete(fixture, &ParseOptions::full());
    assert_eq!(info.kind, AssistKind::MessageSend);
    assert_eq!(info.printed, "<CompleteOnMessageSend:foo.bar()>");
    assert!(info.replaced.is_empty());
}

#[test]
fn selecting_allocated_type_selects_allocation() {
    let (text, range) =
        extract_range("class X {\n  void m() {\n    Object o = new /*start*/Foo/*end*/();\n  }\n}\n");
    let parsed = parse_with_cursor(
        &text,
        &ParseOptions::full(),
        CursorSpec::Selection(TextRange::new(range.start, range.end)),
    )
    .unwrap();
    let info = parsed.assist.unwrap();
    assert_eq!(info.kind, AssistKind::AllocationExpression);
    assert_eq!(info.printed, "<SelectOnAllocationExpression:new Foo()>");
    assert_eq!(replaced_text(&text, &info), "Foo");
}

#[test]
fn declaration_site_names() {
    let (_, info) = complete(
        "class X {\n  void m() {\n    int fo$0\n  }\n}\n",
        &ParseOptions::full(),
    );
    assert_eq!(info.kind, AssistKind::LocalName);
    assert_eq!(info.printed, "<CompleteOnLocalName:int fo>");

    let (_, info) = complete(
        "class X {\n  void m() {\n    while (true) {\n      break lo$0;\n    }\n  }\n}\n",
        &ParseOptions::full(),
    );
    assert_eq!(info.kind, AssistKind::Label);
    assert_eq!(info.printed, "<CompleteOnLabel:lo>");
}

#[test]
fn class_literal_on_array_type() {
    let (_, info) = complete(
        "class X {\n  Object c = String[].cla$0;\n}\n",
        &ParseOptions::diet(),
    );
    assert_eq!(info.kind, AssistKind::ClassLiteralAccess);
    assert_eq!(info.printed, "<CompleteOnClassLiteralAccess:String[].cla>");
}

#[test]
fn enclosing_path_reaches_member_types() {
    let fixture = "class A {\n  class B {\n    void m() { fo$0 }\n  }\n}\n";
    let (_, info) = complete(fixture, &ParseOptions::diet());
    assert_eq!(info.kind, AssistKind::Name);
    assert_eq!(
        info.enclosing,
        DeclPath {
            types: vec![0, 0],
            member: Some(0),
        }
    );
}

#[test]
fn caret_inside_multibyte_identifier() {
    let text = "class X {\n  void m() {\n    café\n  }\n}\n";
    let inside = text.find('é').unwrap() + 1;
    let parsed = parse_with_cursor(
        text,
        &ParseOptions::full(),
        CursorSpec::Completion(inside as u32),
    )
    .unwrap();
    let info = parsed.assist.unwrap();
    assert_eq!(info.kind, AssistKind::Name);
    assert_eq!(info.partial, "caf");
    assert_eq!(replaced_text(text, &info), "café");

    assert!(parse_with_cursor(
        text,
        &ParseOptions::diet(),
        CursorSpec::Selection(TextRange::new(inside, inside + 1)),
    )
    .is_ok());
}

#[test]
fn name_completion_keeps_trailing_member_accesses() {
    let fixture = "class X {\n  void m() {\n    x.y$0.z.w();\n  }\n}\n";
    let (text, offset) = extract_cursor(fixture);
    let parsed =
        parse_with_cursor(&text, &ParseOptions::full(), CursorSpec::Completion(offset as u32))
            .unwrap();
    let info = parsed.assist.clone().unwrap();
    assert_eq!(info.kind, AssistKind::Name);
    assert_eq!(info.printed, "<CompleteOnName:x.y>");
    assert_eq!(replaced_text(&text, &info), "x.y");
    assert_eq!(method_body(&parsed.unit, "m").stmts.len(), 1);
    assert!(print_unit(&parsed.unit).contains("    <CompleteOnName:x.y>.z.w();\n"));
}

#[test]
fn completion_before_an_argument_keeps_the_arguments() {
    let fixture = "class X {\n  void m() {\n    foo.bar($01, 2);\n  }\n}\n";
    let (_, info) = complete(fixture, &ParseOptions::full());
    assert_eq!(info.kind, AssistKind::MessageSend);
    assert_eq!(info.printed, "<CompleteOnMessageSend:foo.bar(1, 2)>");
    assert!(info.replaced.is_empty());
}

#[test]
fn assist_statement_keeps_surrounding_tree() {
    let fixture = "class X {\n  void m() {\n    a();\n    fo$0;\n    b();\n  }\n}\n";
    let (text, offset) = extract_cursor(fixture);
    let parsed =
        parse_with_cursor(&text, &ParseOptions::full(), CursorSpec::Completion(offset as u32))
            .unwrap();
    let stmts = &method_body(&parsed.unit, "m").stmts;
    assert_eq!(stmts.len(), 3);
    assert!(matches!(&stmts[1], Stmt::Expr(Expr::Assist(_))));
    assert!(parsed.unit.types[0]
        .members
        .iter()
        .any(|member| matches!(member, Member::Constructor(ctor) if ctor.is_default)));
}
