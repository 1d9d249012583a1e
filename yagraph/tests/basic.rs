use yagraph::{load, Node, ScalarStyle};

fn texts(node: &Node) -> Vec<String> {
    node.as_sequence()
        .unwrap()
        .iter()
        .map(|item| item.as_str().unwrap().to_owned())
        .collect()
}

#[test]
fn test_sequence_of_scalars() {
    let s = "
- Mark McGwire
- Sammy Sosa
- Ken Griffey
";
    let docs = load(s).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(
        texts(docs[0].root()),
        ["Mark McGwire", "Sammy Sosa", "Ken Griffey"]
    );
}

#[test]
fn test_two_documents() {
    let s = "# Ranking of 1998 home runs
---
- Mark McGwire
- Sammy Sosa
- Ken Griffey

# Team ranking
---
- Chicago Cubs
- St Louis Cardinals
";
    let docs = load(s).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(
        texts(docs[0].root()),
        ["Mark McGwire", "Sammy Sosa", "Ken Griffey"]
    );
    assert_eq!(texts(docs[1].root()), ["Chicago Cubs", "St Louis Cardinals"]);
}

#[test]
fn test_play_by_play() {
    let s = "---
time: 20:03:20
player: Sammy Sosa
action: strike (miss)
...
---
time: 20:03:47
player: Sammy Sosa
action: grand slam
...
";
    let docs = load(s).unwrap();
    assert_eq!(docs.len(), 2);
    let first = docs[0].root();
    assert_eq!(first.get("time").unwrap().as_str(), Some("20:03:20"));
    assert_eq!(first.get("player").unwrap().as_str(), Some("Sammy Sosa"));
    assert_eq!(first.get("action").unwrap().as_str(), Some("strike (miss)"));
    let second = docs[1].root();
    assert_eq!(second.get("time").unwrap().as_str(), Some("20:03:47"));
    assert_eq!(second.get("action").unwrap().as_str(), Some("grand slam"));
    assert!(second.get("score").is_none());
}

#[test]
fn test_literal_ascii_art() {
    let s = "# ASCII Art
--- |
  \\//||\\/||
  // ||  ||__
";
    let docs = load(s).unwrap();
    let scalar = docs[0].root().as_scalar().unwrap();
    assert_eq!(scalar.text(), "\\//||\\/||\n// ||  ||__");
    assert_eq!(scalar.style(), ScalarStyle::Literal);
}

#[test]
fn test_multi_line_flow_scalars() {
    let s = "plain:
  This unquoted scalar
  spans many lines.

quoted: \"So does this
  quoted scalar.

  \"
";
    let docs = load(s).unwrap();
    let root = docs[0].root();
    assert_eq!(
        root.get("plain").unwrap().as_str(),
        Some("This unquoted scalar spans many lines.")
    );
    assert_eq!(
        root.get("quoted").unwrap().as_str(),
        Some("So does this quoted scalar.\n")
    );
}

#[test]
fn test_api() {
    let s = "
# from yaml-cpp example
- name: Ogre
  position: [0, 5, 0]
  powers:
    - name: Club
      damage: 10
    - name: Fist
      damage: 8
- name: Dragon
  position: [1, 0, 10]
  powers:
    - name: Fire Breath
      damage: 25
    - name: Claws
      damage: 15
";
    let docs = load(s).unwrap();
    let root = docs[0].root().as_sequence().unwrap();
    assert_eq!(root.len(), 2);
    assert_eq!(root[0].get("name").unwrap().as_str(), Some("Ogre"));
    assert_eq!(root[0].get("position").unwrap().to_string(), "[0,5,0]");
    let powers = root[1].get("powers").unwrap().as_sequence().unwrap();
    assert_eq!(powers[1].get("damage").unwrap().as_str(), Some("15"));
    assert_eq!(
        root[1].to_string(),
        "{name:Dragon,position:[1,0,10],powers:[{name:Fire Breath,damage:25},{name:Claws,damage:15}]}"
    );
}

#[test]
fn test_folding() {
    let fold = |s: &str| load(s).unwrap()[0].root().as_str().unwrap().to_owned();
    assert_eq!(fold("a\nb"), "a b");
    assert_eq!(fold("a\n\nb"), "a\nb");
    assert_eq!(fold("a\n\n\nb"), "a\n\nb");
    assert_eq!(fold("'a\n  b'"), "a b");
    assert_eq!(fold("'a  \n\n  b'"), "a\nb");
    assert_eq!(fold("\"a\\\n  b\""), "ab");
    assert_eq!(fold("\"a\\nb\\t\\u00e9\""), "a\nb\té");
    assert_eq!(fold("'it''s'"), "it's");
}

#[test]
fn test_block_scalars() {
    let text = |s: &str| load(s).unwrap()[0].root().as_str().unwrap().to_owned();
    assert_eq!(text("|\n  a\n  b\n"), "a\nb");
    assert_eq!(text("|-\n  a\n  b\n"), "a\nb");
    assert_eq!(text("|+\n  a\n  b\n\n"), "a\nb\n\n");
    assert_eq!(text("|\n  a\n   b\n\n  c\n"), "a\n b\n\nc");
    assert_eq!(text("|2\n   a\n  b\n"), " a\nb");
    assert_eq!(text(">\n  a\n  b\n\n  c\n   d\n  e\n"), "a b\nc\n d\ne");
    assert_eq!(
        text(
            ">
 Sammy Sosa completed another
 fine season with great stats.

   63 Home Runs
   0.288 Batting Average

 What a year!
"
        ),
        "Sammy Sosa completed another fine season with great stats.\n\n  63 Home Runs\n  0.288 Batting Average\n\nWhat a year!"
    );
}

#[test]
fn test_block_scalar_in_mapping() {
    let docs = load("a: |\n  x\n  y\nb: >-\n  z\n  w\nc: d\n").unwrap();
    let root = docs[0].root();
    assert_eq!(root.get("a").unwrap().as_str(), Some("x\ny"));
    assert_eq!(root.get("b").unwrap().as_str(), Some("z w"));
    assert_eq!(root.get("c").unwrap().as_str(), Some("d"));
}

#[test]
fn test_empty_values() {
    let docs = load("a:\nb: 1\nc:\n").unwrap();
    assert_eq!(docs[0].root().to_string(), "{a:,b:1,c:}");

    let docs = load("- \n- x\n-\n").unwrap();
    assert_eq!(docs[0].root().to_string(), "[,x,]");

    let docs = load("{a, b: c}").unwrap();
    assert_eq!(docs[0].root().to_string(), "{a:,b:c}");
}

#[test]
fn test_flow_collections() {
    let root = |s: &str| load(s).unwrap()[0].root().to_string();
    assert_eq!(root("[]"), "[]");
    assert_eq!(root("{}"), "{}");
    assert_eq!(root("[a, [b, c], {d: e},]"), "[a,[b,c],{d:e}]");
    assert_eq!(root("[a: 1, b]"), "[{a:1},b]");
    assert_eq!(root("{\"a\":1, 'b': [2]}"), "{a:1,b:[2]}");
    assert_eq!(root("[a\n  b, c]"), "[a b,c]");
    assert_eq!(root("{? a: b, c: d}"), "{a:b,c:d}");
    assert_eq!(root("{ ? a : b }"), "{a:b}");
    assert_eq!(root("[? a : b]"), "[{a:b}]");
    assert_eq!(root("{? [x, y] : z, ? w}"), "{[x,y]:z,w:}");
}

#[test]
fn test_explicit_keys() {
    let s = "? - Detroit Tigers
  - Chicago cubs
:
  - 2001-07-23

? [ New York Yankees,
    Atlanta Braves ]
: [ 2001-07-02, 2001-08-12,
    2001-08-14 ]
";
    let docs = load(s).unwrap();
    let map = docs[0].root().as_mapping().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(
        map.get("[Detroit Tigers,Chicago cubs]").unwrap().to_string(),
        "[2001-07-23]"
    );
    assert_eq!(
        map.get("[New York Yankees,Atlanta Braves]")
            .unwrap()
            .to_string(),
        "[2001-07-02,2001-08-12,2001-08-14]"
    );
}

#[test]
fn test_mapping_order_and_duplicates() {
    let docs = load("z: 1\na: 2\nz: 3\n").unwrap();
    let map = docs[0].root().as_mapping().unwrap();
    let keys: Vec<_> = map.keys().map(ToString::to_string).collect();
    assert_eq!(keys, ["z", "a", "z"]);
    assert_eq!(map.get("z").unwrap().as_str(), Some("1"));
}

#[test]
fn test_tags() {
    let docs = load("- !foo [a]\n- !!str 3\n- !bar &x y\n- *x").unwrap();
    let seq = docs[0].root().as_sequence().unwrap();
    assert_eq!(seq[0].tag(), Some("foo"));
    assert!(seq[0].untagged().is_sequence());
    assert_eq!(seq[1].tag(), Some("!str"));
    assert_eq!(seq[1].untagged().as_str(), Some("3"));
    assert_eq!(seq[2].tag(), Some("bar"));
    // The anchor binds the node after the tag.
    assert!(seq[3].tag().is_none());
    assert_eq!(seq[3].as_str(), Some("y"));
    assert_eq!(docs[0].root().to_string(), "[[a],3,y,y]");
}

#[test]
fn test_comments() {
    let s = "# head\na: 1 # trailing\n# tail\n";
    let docs = load(s).unwrap();
    assert_eq!(docs[0].len(), 1);
    assert_eq!(docs[0].root().to_string(), "{a:1}");

    let mut reader = yagraph::Reader::new_from_str(s);
    reader.keep_comments(true);
    let docs = reader.load().unwrap();
    let items: Vec<_> = docs[0].iter().map(ToString::to_string).collect();
    assert_eq!(items, ["# head", "{a:1}"]);
}

#[test]
fn test_empty_documents() {
    assert!(load("").unwrap().is_empty());
    assert!(load("# nothing\n").unwrap().is_empty());
    let docs = load("---\n---\n- a\n---\n...\n").unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].root().to_string(), "[a]");
}

#[test]
fn test_crlf() {
    let docs = load("a: 1\r\nb:\r\n  - x\r\n  - y\r\n").unwrap();
    assert_eq!(docs[0].root().to_string(), "{a:1,b:[x,y]}");
}
