use trellis::bitset::Bitset;
use trellis::context::Context;
use trellis::fca;
use trellis::tabula;

const SYSCALLS: &str = "
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

fn syscalls() -> Context<String, String> {
    tabula::read_context(SYSCALLS).unwrap()
}

#[test]
fn empty_relation_has_two_concepts() {
    let ctx = Context::make(vec!["o1", "o2"], vec!["a1"]).unwrap();
    let concepts = fca::concepts(&ctx).unwrap();
    assert_eq!(concepts.len(), 2);

    let top = fca::top(&ctx).unwrap();
    assert_eq!(top.objects().count(), 2, "top holds every object");
    assert!(top.attributes().is_empty(), "no attribute is shared by all objects");

    let bottom = fca::bottom(&ctx).unwrap();
    assert!(bottom.objects().is_empty());
    assert_eq!(bottom.attributes().count(), 1);

    let lowers = fca::lower(&ctx, &top).unwrap();
    assert_eq!(lowers.len(), 1);
    assert_eq!(lowers[0], bottom, "top covers bottom directly");
    let uppers = fca::upper(&ctx, &bottom).unwrap();
    assert_eq!(uppers.len(), 1);
    assert_eq!(uppers[0], top);
}

#[test]
fn extremes_have_no_neighbors_beyond() {
    let ctx = syscalls();
    let top = fca::top(&ctx).unwrap();
    let bottom = fca::bottom(&ctx).unwrap();
    assert!(fca::upper(&ctx, &top).unwrap().is_empty(), "nothing covers top");
    assert!(fca::lower(&ctx, &bottom).unwrap().is_empty(), "bottom covers nothing");
}

#[test]
fn single_full_pair_collapses_to_one_concept() {
    let ctx = Context::make(vec!["o1"], vec!["a1"]).unwrap().relate(&"o1", &"a1").unwrap();
    let concepts = fca::concepts(&ctx).unwrap();
    assert_eq!(concepts.len(), 1, "top and bottom coincide");
    assert_eq!(fca::top(&ctx).unwrap(), fca::bottom(&ctx).unwrap());
}

#[test]
fn full_relation_collapses_like_the_single_pair() {
    let mut ctx = Context::make(vec!["o1", "o2"], vec!["a1", "a2"]).unwrap();
    for x in ["o1", "o2"] {
        for y in ["a1", "a2"] {
            ctx = ctx.relate(&x, &y).unwrap();
        }
    }
    assert_eq!(fca::size(&ctx).unwrap(), 1, "all objects share all attributes");
}

#[test]
fn identity_relation_forms_a_diamond() {
    let ctx = Context::make(vec!["o1", "o2"], vec!["a1", "a2"])
        .unwrap()
        .relate(&"o1", &"a1")
        .unwrap()
        .relate(&"o2", &"a2")
        .unwrap();
    let concepts = fca::concepts(&ctx).unwrap();
    assert_eq!(concepts.len(), 4);
    let top = fca::top(&ctx).unwrap();
    let middles = fca::lower(&ctx, &top).unwrap();
    assert_eq!(middles.len(), 2, "two incomparable concepts under top");
    for middle in &middles {
        let lowers = fca::lower(&ctx, middle).unwrap();
        assert_eq!(lowers.len(), 1);
        assert_eq!(lowers[0], fca::bottom(&ctx).unwrap());
    }
}

fn staircase(strict: bool) -> Context<String, String> {
    let objects: Vec<String> = (1..=3).map(|i| format!("o{i}")).collect();
    let attributes: Vec<String> = (1..=3).map(|j| format!("a{j}")).collect();
    let mut ctx = Context::make(objects, attributes).unwrap();
    for i in 1..=3usize {
        for j in 1..=3usize {
            let keep = if strict { j < i } else { j <= i };
            if keep {
                ctx = ctx.relate(&format!("o{i}"), &format!("a{j}")).unwrap();
            }
        }
    }
    ctx
}

#[test]
fn staircase_relation_forms_a_chain() {
    // With the diagonal included every row is nonempty and every column
    // inhabited, so the extremes merge into the chain: 3 concepts.
    assert_eq!(fca::size(&staircase(false)).unwrap(), 3);

    // The strict staircase leaves o1 bare and a3 unused, which keeps both
    // extremes distinct: a chain of 4.
    let ctx = staircase(true);
    let concepts = fca::concepts(&ctx).unwrap();
    assert_eq!(concepts.len(), 4);
    for concept in &concepts {
        assert!(
            fca::lower(&ctx, concept).unwrap().len() <= 1,
            "every chain member has at most one lower cover"
        );
        assert!(fca::upper(&ctx, concept).unwrap().len() <= 1);
    }
}

#[test]
fn syscalls_fixture_has_23_concepts() {
    let ctx = syscalls();
    assert_eq!(ctx.object_count(), 12);
    assert_eq!(ctx.attribute_count(), 20);
    let concepts = fca::concepts(&ctx).unwrap();
    assert_eq!(concepts.len(), 23);
    assert_eq!(fca::size(&ctx).unwrap(), 23);
}

fn object_set(ctx: &Context<String, String>, names: &[&str]) -> Bitset<String> {
    let owned: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    Bitset::of(ctx.objects(), &owned).unwrap()
}

fn attribute_set(ctx: &Context<String, String>, names: &[&str]) -> Bitset<String> {
    let owned: Vec<String> = names.iter().map(|s| s.to_string()).collect();
    Bitset::of(ctx.attributes(), &owned).unwrap()
}

#[test]
fn syscalls_fixture_contains_the_readme_concepts() {
    let ctx = syscalls();
    let concepts = fca::concepts(&ctx).unwrap();

    let file_extent = object_set(
        &ctx,
        &["access", "creat", "write", "rmdir", "read", "open", "fstat", "chown", "chmod"],
    );
    let file_concept = concepts
        .iter()
        .find(|c| c.objects().equal(&file_extent).unwrap())
        .expect("the file concept must be enumerated");
    assert!(file_concept.attributes().equal(&attribute_set(&ctx, &["file"])).unwrap());

    let create_extent = object_set(&ctx, &["creat", "open", "mkdir", "fork"]);
    let create_concept = concepts
        .iter()
        .find(|c| c.objects().equal(&create_extent).unwrap())
        .expect("the create concept must be enumerated");
    assert!(create_concept.attributes().equal(&attribute_set(&ctx, &["create"])).unwrap());
}

#[test]
fn every_enumerated_pair_is_a_concept() {
    let ctx = syscalls();
    for concept in fca::concepts(&ctx).unwrap() {
        let attrs = ctx.common_attributes(concept.objects()).unwrap();
        assert!(attrs.equal(concept.attributes()).unwrap(), "common(O) must equal A");
        let objs = ctx.common_objects(concept.attributes()).unwrap();
        assert!(objs.equal(concept.objects()).unwrap(), "common'(A) must equal O");
    }
}

#[test]
fn closure_is_idempotent() {
    let ctx = syscalls();
    for seed in [&["chmod"][..], &["chmod", "fork"][..], &["read", "write", "open"][..]] {
        let once = fca::closure(&ctx, &object_set(&ctx, seed)).unwrap();
        let twice = fca::closure(&ctx, once.objects()).unwrap();
        assert_eq!(once, twice, "closing a closed set must change nothing");
    }
    let attrs = attribute_set(&ctx, &["create", "file"]);
    let once = fca::closure_attrs(&ctx, &attrs).unwrap();
    let twice = fca::closure_attrs(&ctx, once.attributes()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn folds_visit_each_concept_exactly_once() {
    let ctx = syscalls();
    let up_visits = fca::fold_concepts(&ctx, 0usize, |_, _, n| Ok(n + 1)).unwrap();
    let down_visits = fca::fold_concepts_topdown(&ctx, 0usize, |_, _, n| Ok(n + 1)).unwrap();
    assert_eq!(up_visits, 23);
    assert_eq!(down_visits, 23);
}

#[test]
fn both_folds_enumerate_the_same_cover_edges() {
    let ctx = syscalls();
    let up_edges = fca::fold_concepts(&ctx, 0usize, |_, uppers, n| Ok(n + uppers.len())).unwrap();
    let down_edges =
        fca::fold_concepts_topdown(&ctx, 0usize, |_, lowers, n| Ok(n + lowers.len())).unwrap();
    assert_eq!(up_edges, down_edges, "each cover edge must be seen once from either side");
    assert_eq!(up_edges, 41);
}

#[test]
fn pruned_fold_stops_below_the_threshold() {
    let ctx = syscalls();
    // Predicate keeps concepts with at least 2 objects; bottom has 0 and is
    // reported as a neighbor but never expanded.
    let visited = fca::fold_concepts_pruned(
        &ctx,
        |c| c.objects().count() >= 2,
        Vec::new(),
        |concept, _, mut acc| {
            acc.push(concept.objects().count());
            Ok(acc)
        },
    )
    .unwrap();
    assert!(visited.len() < 23, "pruning must skip part of the lattice");
    assert!(
        visited.iter().skip(1).all(|&n| n >= 2),
        "no expanded concept below the threshold except the seed"
    );
}
