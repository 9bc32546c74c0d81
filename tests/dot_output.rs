use trellis::context::Context;
use trellis::dot;
use trellis::tabula;

#[test]
fn empty_relation_renders_two_nodes_and_one_edge() {
    let ctx = Context::make(vec!["o1", "o2"], vec!["a1"]).unwrap();
    let graph = dot::dot_graph(&ctx).unwrap();
    assert!(graph.starts_with("digraph lattice {"));
    assert_eq!(graph.matches("label=").count(), 2);
    assert_eq!(graph.matches("->").count(), 1);
    assert!(graph.contains("c0 -> c1;"), "top (visited first) covers bottom");
}

#[test]
fn syscalls_lattice_renders_every_cover_edge() {
    let table = "
chmod: change file mode permission ;
chown: change file group owner ;
fstat: get file status ;
fork:  create new process ;
chdir: change directory ;
mkdir: create directory new ;
open:  create file open read write ;
read:  file input read ;
rmdir: directory file remove ;
write: file output write ;
creat: create file new ;
access: access check file ;
";
    let ctx = tabula::read_context(table).unwrap();
    let graph = dot::dot_graph(&ctx).unwrap();
    assert_eq!(graph.matches("label=").count(), 23, "one node per concept");
    assert_eq!(graph.matches("->").count(), 41, "one edge per cover pair");
    assert!(graph.trim_end().ends_with('}'));
}

#[test]
fn quotes_in_names_are_escaped() {
    let ctx = Context::make(vec!["o\"1"], vec!["a"]).unwrap().relate(&"o\"1", &"a").unwrap();
    let graph = dot::dot_graph(&ctx).unwrap();
    assert!(graph.contains("\\\""), "quoted identifiers must not break the label");
}
