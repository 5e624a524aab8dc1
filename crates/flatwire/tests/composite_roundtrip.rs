//! Round-trips user-defined composites and unions through the public API.

use flatwire::{
    Category, Classify, DecodeError, DecodeOptions, Decoder, EncodeError, EncodeOptions, Encoder,
    ErrorCode, OneOf2, OneOf3, composite, from_bytes, from_bytes_with_options, tagged_union,
    to_bytes, to_bytes_with_options, to_trace_string,
};

#[derive(Debug, Default, Clone, PartialEq)]
struct Foo {
    name: String,
    id: u16,
    values: Vec<u8>,
}

composite!(Foo { name, id, values });

#[derive(Debug, Default, Clone, PartialEq)]
struct Bar {
    name: String,
    id: OneOf2<u8, String>,
    foo: Foo,
    values: Vec<OneOf3<Foo, u8, u16>>,
}

composite!(Bar { name, id, foo, values });

#[derive(Debug, Default, Clone, PartialEq)]
struct Triple {
    a: u32,
    b: String,
    c: Vec<u8>,
}

composite!(Triple { a, b, c });

/// Recursive record: children are boxed through a sequence.
#[derive(Debug, Default, Clone, PartialEq)]
struct Node {
    label: String,
    children: Vec<Box<Node>>,
}

composite!(Node { label, children });

tagged_union! {
    #[derive(Debug, Clone, PartialEq)]
    enum Command {
        Noop(()) = 0,
        Rename(String) = 1,
        Move(Triple) = 2,
    }
}

fn sample_bar() -> Bar {
    Bar {
        name: "MrCool".to_string(),
        id: OneOf2::First(17),
        foo: Foo {
            name: "Single foo".to_string(),
            id: 12,
            values: vec![1, 2, 3],
        },
        values: vec![OneOf3::Second(2), OneOf3::Third(7)],
    }
}

fn chain(depth: usize) -> Node {
    let mut node = Node { label: "leaf".to_string(), children: vec![] };
    for _ in 0..depth {
        node = Node { label: "n".to_string(), children: vec![Box::new(node)] };
    }
    node
}

#[test]
fn test_bar_roundtrip() {
    let bar = sample_bar();
    let bytes = to_bytes(&bar).unwrap();
    let decoded: Bar = from_bytes(&bytes).unwrap();
    assert_eq!(decoded, bar);
}

#[test]
fn test_bar_trace() {
    assert_eq!(
        to_trace_string(&sample_bar()),
        "{ MrCool #0 17 { Single foo 12 [ 1 2 3 ] } [ #1 2 #2 7 ] } "
    );
}

#[test]
fn test_bar_layout() {
    let bytes = to_bytes(&sample_bar()).unwrap();

    let mut expected = vec![6];
    expected.extend_from_slice(b"MrCool");
    expected.extend_from_slice(&[0, 17, 10]);
    expected.extend_from_slice(b"Single foo");
    expected.extend_from_slice(&12u16.to_ne_bytes());
    expected.extend_from_slice(&[3, 1, 2, 3]);
    expected.extend_from_slice(&[2, 1, 2, 2]);
    expected.extend_from_slice(&7u16.to_ne_bytes());
    assert_eq!(bytes, expected);
}

#[cfg(target_endian = "little")]
#[test]
fn test_triple_exact_bytes() {
    let triple = Triple { a: 42, b: "hi".to_string(), c: vec![1, 2, 3] };
    let expected = [42, 0, 0, 0, 2, b'h', b'i', 3, 1, 2, 3];

    assert_eq!(to_bytes(&triple).unwrap(), expected);
    assert_eq!(from_bytes::<Triple>(&expected).unwrap(), triple);
}

#[test]
fn test_categories() {
    assert_eq!(<Bar as Classify>::CATEGORY, Category::Composite);
    assert_eq!(<Command as Classify>::CATEGORY, Category::TaggedUnion);
    assert_eq!(<Box<Node> as Classify>::CATEGORY, Category::Composite);
}

#[test]
fn test_recursive_roundtrip() {
    let tree = Node {
        label: "root".to_string(),
        children: vec![
            Box::new(chain(3)),
            Box::new(Node::default()),
            Box::new(Node { label: "x".to_string(), children: vec![Box::new(chain(0))] }),
        ],
    };
    let bytes = to_bytes(&tree).unwrap();
    assert_eq!(from_bytes::<Node>(&bytes).unwrap(), tree);
    assert_eq!(
        to_trace_string(&chain(1)),
        "{ n [ { leaf [ ] } ] } "
    );
}

#[test]
fn test_depth_limit_at_boundary() {
    // Each link is a composite plus its children sequence: chain(n) nests 2n + 2 levels.
    let deepest = chain(63);
    let bytes = to_bytes(&deepest).unwrap();
    assert_eq!(from_bytes::<Node>(&bytes).unwrap(), deepest);

    let too_deep = chain(64);
    assert_eq!(to_bytes(&too_deep), Err(EncodeError::DepthExceeded { max: 128 }));

    let bytes = to_bytes_with_options(&too_deep, EncodeOptions::new().with_max_depth(130)).unwrap();
    assert_eq!(
        from_bytes::<Node>(&bytes),
        Err(DecodeError::DepthExceeded { max: 128 })
    );
    let options = DecodeOptions::new().with_max_depth(130);
    assert_eq!(from_bytes_with_options::<Node>(&bytes, &options).unwrap(), too_deep);
}

#[test]
fn test_union_commands() {
    let commands = vec![
        Command::Noop(()),
        Command::Rename("renamed".to_string()),
        Command::Move(Triple { a: 1, b: String::new(), c: vec![9] }),
    ];
    let bytes = to_bytes(&commands).unwrap();
    assert_eq!(bytes[..2], [3, 0]);
    assert_eq!(from_bytes::<Vec<Command>>(&bytes).unwrap(), commands);
    assert_eq!(
        to_trace_string(&commands),
        "[ #0 { } #1 renamed #2 { 1  [ 9 ] } ] "
    );
}

#[test]
fn test_invalid_tag_aborts() {
    let err = from_bytes::<Command>(&[7, 1, b'x']).unwrap_err();
    assert_eq!(err, DecodeError::InvalidTag { tag: 7, alternatives: 3 });
    assert_eq!(err.code(), ErrorCode::InvalidTag);
}

#[test]
fn test_truncated_bar() {
    let bytes = to_bytes(&sample_bar()).unwrap();
    for cut in [0, 1, 7, bytes.len() - 1] {
        let err = from_bytes::<Bar>(&bytes[..cut]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfBounds, "cut at {cut}");
    }
}

#[test]
fn test_oversized_field_rejected() {
    let mut bar = sample_bar();
    bar.foo.values = vec![0; 300];
    assert_eq!(
        to_bytes(&bar),
        Err(EncodeError::LengthExceedsLimit { category: "sequence", len: 300, max: 255 })
    );
}

#[test]
fn test_stream_of_records() {
    let first = sample_bar();
    let second = Foo { name: "second".to_string(), id: 2, values: vec![] };

    let mut buf = Vec::new();
    let mut encoder = Encoder::new(&mut buf);
    encoder.encode(&first).unwrap().encode(&second).unwrap();

    let mut decoder = Decoder::new(&buf);
    let (mut bar, mut foo) = (Bar::default(), Foo::default());
    decoder.decode_into(&mut bar).unwrap().decode_into(&mut foo).unwrap();
    decoder.finish().unwrap();

    assert_eq!(bar, first);
    assert_eq!(foo, second);
}
