use mparse::prelude::*;

fn nesting<'a>() -> Parser<'a, usize> {
    recursive(|nested| {
        literal('(')
            .ignore_then(nested)
            .skip(literal(')'))
            .transform(|depth| depth + 1)
            .or_else(literal('x').to(0))
    })
}

#[test]
#[should_panic]
fn recursive_define_twice() {
    let expr = Recursive::declare();
    expr.define({
        let atom = at_least::<_, String>(alpha(), 1);
        let sum = expr
            .handle()
            .skip(literal('+'))
            .and_then({
                let expr = expr.handle();
                move |a| expr.clone().transform(move |b| format!("{}{}", a, b))
            });

        sum.or_else(atom)
    });
    expr.define(expr.handle());

    let _ = expr.parser().skip(end()).parse("a+b+c");
}

#[test]
fn mutual_recursion() {
    // even := 'a' odd | ε, odd := 'a' even
    let even = Recursive::<usize>::declare();
    let odd = Recursive::<usize>::declare();

    even.define(
        literal('a')
            .ignore_then(odd.handle())
            .transform(|n| n + 1)
            .or_else(pure(0)),
    );
    odd.define(literal('a').ignore_then(even.handle()).transform(|n| n + 1));

    let even = even.parser().skip(end());
    assert_eq!(even.parse("aaaa"), Ok(4));
    assert_eq!(even.parse(""), Ok(0));
    assert!(even.parse("aaa").is_err());

    // The handle taken by `even` keeps `odd` alive
    drop(odd);
    assert_eq!(even.parse("aa"), Ok(2));
}

#[derive(Debug, PartialEq)]
enum Value {
    Num(u32),
    List(Vec<Value>),
}

fn value<'a>() -> Parser<'a, Value> {
    let value = Recursive::<Value>::declare();
    let list = Recursive::<Vec<Value>>::declare();

    list.define(
        literal('[')
            .ignore_then(delimited_by(value.handle(), literal(','), literal(']')))
            .skip(literal(']')),
    );
    value.define(
        digit(0, 9)
            .transform(Value::Num)
            .or_else(list.handle().transform(Value::List)),
    );

    value.parser()
}

#[test]
fn declared_grammar_outlives_its_declarations() {
    let value = value();
    assert_eq!(value.parse("1"), Ok(Value::Num(1)));
    assert_eq!(
        value.parse("[1,[2]]"),
        Ok(Value::List(vec![
            Value::Num(1),
            Value::List(vec![Value::Num(2)]),
        ])),
    );
}

#[test]
fn nested_recursive_parsers_share_nothing() {
    let a = nesting();
    let b = nesting();
    assert_eq!(a.parse("((x))"), Ok(2));
    drop(a);
    assert_eq!(b.parse("(((x)))"), Ok(3));
}

#[test]
fn unbalanced_nesting_reports_last_alternative() {
    let failure = nesting().parse("((x)").unwrap_err();
    assert_eq!(failure.offset(), 0);
    assert_eq!(
        failure.reason(),
        &Reason::Unexpected {
            expected: mparse::error::Expected::Char('x'),
            found: Some('('),
        }
    );
}

#[cfg(feature = "stacker")]
#[test]
fn deep_nesting() {
    const DEPTH: usize = 5_000;
    let text = format!("{}x{}", "(".repeat(DEPTH), ")".repeat(DEPTH));

    // Spawned threads get a small stack, so this only passes if the stack grows on demand
    let depth = std::thread::spawn(move || {
        let depth = nesting().parse(&text).ok();
        depth
    })
    .join()
    .unwrap();
    assert_eq!(depth, Some(DEPTH));
}
