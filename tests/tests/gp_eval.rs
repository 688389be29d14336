//! GP-Eval integration tests.
//!
//! Hand-built graphs and patterns with exactly known results.

use rebac_tests::prelude::*;

const USER: &str = "user";
const FRIEND: &str = "friend";

mod edge_types {
    use super::*;

    fn graph() -> InMemoryGraph {
        InMemoryGraph::builder()
            .node("UID", USER, attrs!())
            .node("fake", USER, attrs!())
            .node("fakeEnd", USER, attrs! { "end" => false })
            .node("mid", USER, attrs!())
            .node("end", USER, attrs! { "end" => true })
            .edge("UID", "fake", "req->fake", "e1", attrs!())
            .edge("fake", "fakeEnd", "fake->fakeEnd", "e2", attrs!())
            .edge("UID", "mid", "req->mid", "e1", attrs!())
            .edge("mid", "end", "mid->end", "e2", attrs!())
            .build()
            .unwrap()
    }

    fn pattern() -> GraphPattern {
        GraphPattern::builder()
            .node("requestor", USER)
            .node("someNode", USER)
            .node("otherNode", USER)
            .edge("requestor", "someNode", "first", "e1")
            .edge("someNode", "otherNode", "second", "e2")
            .fix("requestor", "UID")
            .require_node("otherNode", "end", RequirementOperator::Equal, true)
            .returns("someNode")
            .returns("otherNode")
            .build()
            .unwrap()
    }

    #[test]
    fn test_decoy_path_is_rejected() {
        init_logging();

        // GIVEN a decoy path ending in end=false and a valid one ending in end=true
        let graph = graph();

        // WHEN evaluating the two-hop pattern
        let results = evaluate(&graph, &pattern()).unwrap();

        // THEN only the valid path is returned
        assert_eq!(result_ids(&results), tuples![["mid", "end"]]);
    }

    #[test]
    fn test_wrong_edge_type_breaks_the_path() {
        // GIVEN the valid path's second hop uses the wrong type
        let graph = InMemoryGraph::builder()
            .node("UID", USER, attrs!())
            .node("mid", USER, attrs!())
            .node("end", USER, attrs! { "end" => true })
            .edge("UID", "mid", "req->mid", "e1", attrs!())
            .edge("mid", "end", "mid->end", "e1", attrs!())
            .build()
            .unwrap();

        // WHEN evaluating
        let results = evaluate(&graph, &pattern()).unwrap();

        // THEN nothing matches
        assert!(results.is_empty());
    }
}

mod fixed_nodes {
    use super::*;

    fn single_free_node() -> GraphPattern {
        GraphPattern::builder()
            .node("nId", "NODE")
            .returns("nId")
            .build()
            .unwrap()
    }

    fn fixed_and_unconnected() -> GraphPattern {
        GraphPattern::builder()
            .node("nId", "NODE")
            .node("otherId", "NODE")
            .fix("nId", "FIXED_NODE")
            .returns("otherId")
            .build()
            .unwrap()
    }

    #[test]
    fn test_pattern_without_fixed_node_is_uncoverable() {
        let graph = InMemoryGraph::builder()
            .node("a", "NODE", attrs!())
            .build()
            .unwrap();

        let result = evaluate(&graph, &single_free_node());

        assert_eq!(
            result.unwrap_err(),
            EvalError::uncoverable(vec!["nId".to_string()])
        );
    }

    #[test]
    fn test_pattern_without_fixed_node_is_uncoverable_on_empty_graph() {
        let graph = InMemoryGraph::builder().build().unwrap();

        let result = evaluate(&graph, &single_free_node());

        assert!(matches!(result, Err(EvalError::Uncoverable { .. })));
    }

    #[test]
    fn test_missing_fixed_node_is_no_match() {
        // GIVEN an empty graph
        let graph = InMemoryGraph::builder().build().unwrap();

        // WHEN the fixed node cannot be found
        let results = evaluate(&graph, &fixed_and_unconnected()).unwrap();

        // THEN the result is empty rather than an error
        assert!(results.is_empty());
    }

    #[test]
    fn test_unconnected_node_is_uncoverable() {
        // GIVEN the fixed node exists
        let graph = InMemoryGraph::builder()
            .node("FIXED_NODE", "NODE", attrs!())
            .node("otherNode", "NODE", attrs!())
            .build()
            .unwrap();

        // WHEN evaluating a pattern whose second node has no edges
        let result = evaluate(&graph, &fixed_and_unconnected());

        // THEN the query itself is reported as malformed
        let err = result.unwrap_err();
        assert_eq!(err, EvalError::uncoverable(vec!["otherId".to_string()]));
        assert!(err.to_string().contains("otherId"));
    }

    #[test]
    fn test_required_edge_without_neighbours_is_no_match() {
        let graph = InMemoryGraph::builder()
            .node("123", USER, attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("test", USER)
            .node("nonexisting", USER)
            .edge("test", "nonexisting", "e", FRIEND)
            .fix("test", "123")
            .returns("nonexisting")
            .build()
            .unwrap();

        let results = evaluate(&graph, &pattern).unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn test_fixed_node_is_not_type_checked() {
        // GIVEN the fixed id belongs to a node of another type
        let graph = InMemoryGraph::builder()
            .node("x", "robot", attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("me", USER)
            .fix("me", "x")
            .returns("me")
            .build()
            .unwrap();

        // WHEN evaluating
        let results = evaluate(&graph, &pattern).unwrap();

        // THEN the id alone decides the binding
        assert_eq!(result_ids(&results), tuples![["x"]]);
    }
}

mod self_connections {
    use super::*;

    const EDGE: &str = "EDGE";
    const NODE: &str = "NODE";
    const NODE_ID: &str = "someNodeId";

    fn single_node_pattern() -> GraphPattern {
        GraphPattern::builder()
            .node("someId", NODE)
            .edge("someId", "someId", "loop", EDGE)
            .fix("someId", NODE_ID)
            .returns("someId")
            .build()
            .unwrap()
    }

    fn two_node_pattern() -> GraphPattern {
        GraphPattern::builder()
            .node("someId", NODE)
            .node("otherId", NODE)
            .edge("someId", "otherId", "link", EDGE)
            .edge("otherId", "otherId", "loop", EDGE)
            .fix("someId", NODE_ID)
            .returns("otherId")
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_node_with_self_connection() {
        let graph = InMemoryGraph::builder()
            .node(NODE_ID, NODE, attrs!())
            .edge(NODE_ID, NODE_ID, "someEdgeId", EDGE, attrs!())
            .build()
            .unwrap();

        let results = evaluate(&graph, &single_node_pattern()).unwrap();

        assert_eq!(result_ids(&results), tuples![[NODE_ID]]);
    }

    #[test]
    fn test_single_node_without_self_connection() {
        let graph = InMemoryGraph::builder()
            .node(NODE_ID, NODE, attrs!())
            .build()
            .unwrap();

        let results = evaluate(&graph, &single_node_pattern()).unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn test_self_connection_of_reached_node() {
        let graph = InMemoryGraph::builder()
            .node(NODE_ID, NODE, attrs!())
            .node("selfConnectNode", NODE, attrs!())
            .edge(NODE_ID, "selfConnectNode", "someEdgeId", EDGE, attrs!())
            .edge(
                "selfConnectNode",
                "selfConnectNode",
                "selfConnectEdge",
                EDGE,
                attrs!(),
            )
            .build()
            .unwrap();

        let results = evaluate(&graph, &two_node_pattern()).unwrap();

        assert_eq!(result_ids(&results), tuples![["selfConnectNode"]]);
    }

    #[test]
    fn test_reached_node_without_self_connection() {
        let graph = InMemoryGraph::builder()
            .node(NODE_ID, NODE, attrs!())
            .node("selfConnectNode", NODE, attrs!())
            .edge(NODE_ID, "selfConnectNode", "someEdgeId", EDGE, attrs!())
            .build()
            .unwrap();

        let results = evaluate(&graph, &two_node_pattern()).unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn test_self_connection_requirements_are_checked() {
        // GIVEN a self-connection that is too light
        let graph = InMemoryGraph::builder()
            .node(NODE_ID, NODE, attrs!())
            .edge(
                NODE_ID,
                NODE_ID,
                "someEdgeId",
                EDGE,
                attrs! { "weight" => 1 },
            )
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("someId", NODE)
            .edge("someId", "someId", "loop", EDGE)
            .fix("someId", NODE_ID)
            .require_edge("loop", "weight", RequirementOperator::GreaterThan, 5)
            .returns("someId")
            .build()
            .unwrap();

        // WHEN evaluating
        let results = evaluate(&graph, &pattern).unwrap();

        // THEN the node is excluded
        assert!(results.is_empty());
    }
}

mod friend_of_friend {
    use super::*;

    /// ```text
    /// out <-> con <-> completor
    ///          ^          ^
    ///          v          |
    ///       conFriend ----'
    /// ```
    fn graph() -> InMemoryGraph {
        InMemoryGraph::builder()
            .node("out", USER, attrs!())
            .node("con", USER, attrs!())
            .node("conFriend", USER, attrs!())
            .node("completor", USER, attrs!())
            .edge("out", "con", "out->con", FRIEND, attrs!())
            .edge("con", "out", "con->out", FRIEND, attrs!())
            .edge("con", "conFriend", "con->conFriend", FRIEND, attrs!())
            .edge("conFriend", "con", "conFriend->con", FRIEND, attrs!())
            .edge("con", "completor", "con->completor", FRIEND, attrs!())
            .edge("completor", "con", "completor->con", FRIEND, attrs!())
            .edge(
                "conFriend",
                "completor",
                "conFriend->completor",
                FRIEND,
                attrs!(),
            )
            .build()
            .unwrap()
    }

    fn pattern(requestor: &str) -> GraphPattern {
        GraphPattern::builder()
            .node("requestor", USER)
            .node("f", USER)
            .node("fof", USER)
            .edge("requestor", "f", "rf", FRIEND)
            .edge("f", "fof", "ffof", FRIEND)
            .exclude("requestor", "fof")
            .fix("requestor", requestor)
            .returns("fof")
            .actor("requestor", "requestor")
            .actor("friend", "f")
            .actor("friendOfFriend", "fof")
            .build()
            .unwrap()
    }

    #[test]
    fn test_outsider() {
        let results = evaluate(&graph(), &pattern("out")).unwrap();
        assert_eq!(result_ids(&results), tuples![["completor"], ["conFriend"]]);
    }

    #[test]
    fn test_connector() {
        init_logging();
        let results = evaluate(&graph(), &pattern("con")).unwrap();
        assert_eq!(result_ids(&results), tuples![["completor"]]);
    }

    #[test]
    fn test_completor() {
        let results = evaluate(&graph(), &pattern("completor")).unwrap();
        assert_eq!(result_ids(&results), tuples![["conFriend"], ["out"]]);
    }

    #[test]
    fn test_repeated_evaluation_is_idempotent() {
        let graph = graph();
        let pattern = pattern("con");
        let matcher = Matcher::new(&graph);

        let first = matcher.evaluate(&pattern).unwrap();
        let second = matcher.evaluate(&pattern).unwrap();

        assert_eq!(first, second);
    }
}

mod student {
    use super::*;

    #[test]
    fn test_professor_sees_courses_they_teach_to_the_student() {
        // GIVEN a student attending two courses, one taught by the professor
        let graph = InMemoryGraph::builder()
            .node("1337331", "prof", attrs!())
            .node("12345678", "student", attrs!())
            .node("somecourse", "course", attrs!())
            .node("othercourse", "course", attrs!())
            .edge(
                "12345678",
                "somecourse",
                "ac",
                "attend_course",
                attrs! { "grade" => 1 },
            )
            .edge(
                "12345678",
                "othercourse",
                "ac2",
                "attend_course",
                attrs! { "grade" => 1 },
            )
            .edge("1337331", "somecourse", "tc", "teach_course", attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("requestor", "prof")
            .node("student", "student")
            .node("course", "course")
            .edge("student", "course", "ac", "attend_course")
            .edge("requestor", "course", "tc", "teach_course")
            .fix("requestor", "1337331")
            .fix("student", "12345678")
            .require_edge("ac", "grade", RequirementOperator::LessThan, 5)
            .returns("course")
            .build()
            .unwrap();

        // WHEN evaluating
        let results = evaluate(&graph, &pattern).unwrap();

        // THEN only the shared course is returned
        assert_eq!(result_ids(&results), tuples![["somecourse"]]);
    }
}

mod requirements {
    use super::*;

    fn graph() -> InMemoryGraph {
        let mut builder = InMemoryGraph::builder().node("hub", USER, attrs!());
        for age in [10, 20, 30, 40] {
            let id = format!("u{}", age);
            builder = builder
                .node(id.as_str(), USER, attrs! { "age" => age })
                .edge("hub", id.as_str(), format!("hub->{}", id), FRIEND, attrs!());
        }
        builder.build().unwrap()
    }

    fn friends_where(operator: RequirementOperator, age: i64) -> Vec<Vec<String>> {
        let pattern = GraphPattern::builder()
            .node("me", USER)
            .node("friend", USER)
            .edge("me", "friend", "f", FRIEND)
            .fix("me", "hub")
            .require_node("friend", "age", operator, age)
            .returns("friend")
            .build()
            .unwrap();
        result_ids(&evaluate(&graph(), &pattern).unwrap())
    }

    #[test]
    fn test_ordering_operators() {
        assert_eq!(
            friends_where(RequirementOperator::LessThan, 30),
            tuples![["u10"], ["u20"]]
        );
        assert_eq!(
            friends_where(RequirementOperator::LessThanOrEqual, 30),
            tuples![["u10"], ["u20"], ["u30"]]
        );
        assert_eq!(
            friends_where(RequirementOperator::GreaterThan, 30),
            tuples![["u40"]]
        );
        assert_eq!(
            friends_where(RequirementOperator::GreaterThanOrEqual, 30),
            tuples![["u30"], ["u40"]]
        );
        assert_eq!(
            friends_where(RequirementOperator::Equal, 20),
            tuples![["u20"]]
        );
    }

    #[test]
    fn test_missing_attribute_fails_requirement() {
        // GIVEN the hub itself has no age
        let pattern = GraphPattern::builder()
            .node("me", USER)
            .fix("me", "hub")
            .require_node("me", "age", RequirementOperator::GreaterThan, 0)
            .returns("me")
            .build()
            .unwrap();

        // WHEN evaluating
        let results = evaluate(&graph(), &pattern).unwrap();

        // THEN the requirement is simply unmet
        assert!(results.is_empty());
    }

    #[test]
    fn test_ordering_on_string_attribute_is_an_error() {
        // GIVEN a friend whose age is a string
        let graph = InMemoryGraph::builder()
            .node("hub", USER, attrs!())
            .node("odd", USER, attrs! { "age" => "old" })
            .edge("hub", "odd", "e", FRIEND, attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("me", USER)
            .node("friend", USER)
            .edge("me", "friend", "f", FRIEND)
            .fix("me", "hub")
            .require_node("friend", "age", RequirementOperator::GreaterThanOrEqual, 18)
            .returns("friend")
            .build()
            .unwrap();

        // WHEN evaluating
        let result = evaluate(&graph, &pattern);

        // THEN the mismatch aborts the call instead of reading as "no match"
        match result {
            Err(EvalError::Attribute(CoreError::TypeMismatch { expected, actual })) => {
                assert_eq!(expected, "numeric");
                assert_eq!(actual, AttributeValue::from("old"));
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_equality_on_string_attribute_is_fine() {
        let graph = InMemoryGraph::builder()
            .node("hub", USER, attrs!())
            .node("odd", USER, attrs! { "age" => "old" })
            .edge("hub", "odd", "e", FRIEND, attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("me", USER)
            .node("friend", USER)
            .edge("me", "friend", "f", FRIEND)
            .fix("me", "hub")
            .require_node("friend", "age", RequirementOperator::Equal, 18)
            .returns("friend")
            .build()
            .unwrap();

        let results = evaluate(&graph, &pattern).unwrap();

        assert!(results.is_empty());
    }
}

mod mutual_exclusion {
    use super::*;

    #[test]
    fn test_common_friends_must_differ() {
        // GIVEN alice and bob share exactly one friend, carol
        let graph = InMemoryGraph::builder()
            .node("alice", USER, attrs!())
            .node("bob", USER, attrs!())
            .node("carol", USER, attrs!())
            .node("dave", USER, attrs!())
            .edge("alice", "carol", "ac", FRIEND, attrs!())
            .edge("alice", "dave", "ad", FRIEND, attrs!())
            .edge("carol", "bob", "cb", FRIEND, attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("requestor", USER)
            .node("target", USER)
            .node("f1", USER)
            .node("f2", USER)
            .edge("requestor", "f1", "r1", FRIEND)
            .edge("requestor", "f2", "r2", FRIEND)
            .edge("f1", "target", "t1", FRIEND)
            .edge("f2", "target", "t2", FRIEND)
            .exclude("f1", "f2")
            .fix("requestor", "alice")
            .returns("target")
            .build()
            .unwrap();

        // WHEN asking for targets with two distinct common friends
        let results = evaluate(&graph, &pattern).unwrap();

        // THEN carol alone is not enough
        assert!(results.is_empty());
    }

    #[test]
    fn test_two_common_friends_are_found() {
        let graph = InMemoryGraph::builder()
            .node("alice", USER, attrs!())
            .node("bob", USER, attrs!())
            .node("carol", USER, attrs!())
            .node("dave", USER, attrs!())
            .edge("alice", "carol", "ac", FRIEND, attrs!())
            .edge("alice", "dave", "ad", FRIEND, attrs!())
            .edge("carol", "bob", "cb", FRIEND, attrs!())
            .edge("dave", "bob", "db", FRIEND, attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("requestor", USER)
            .node("target", USER)
            .node("f1", USER)
            .node("f2", USER)
            .edge("requestor", "f1", "r1", FRIEND)
            .edge("requestor", "f2", "r2", FRIEND)
            .edge("f1", "target", "t1", FRIEND)
            .edge("f2", "target", "t2", FRIEND)
            .exclude("f1", "f2")
            .fix("requestor", "alice")
            .returns("target")
            .returns("f1")
            .returns("f2")
            .build()
            .unwrap();

        let results = evaluate(&graph, &pattern).unwrap();

        assert_eq!(
            result_ids(&results),
            tuples![["bob", "carol", "dave"], ["bob", "dave", "carol"]]
        );
    }
}

mod returned_nodes {
    use super::*;

    #[test]
    fn test_node_returned_twice_repeats_in_tuple() {
        let graph = InMemoryGraph::builder()
            .node("a", USER, attrs!())
            .node("b", USER, attrs!())
            .edge("a", "b", "ab", FRIEND, attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("me", USER)
            .node("friend", USER)
            .edge("me", "friend", "f", FRIEND)
            .fix("me", "a")
            .returns("friend")
            .returns("me")
            .returns("friend")
            .build()
            .unwrap();

        let results = evaluate(&graph, &pattern).unwrap();

        assert_eq!(result_ids(&results), tuples![["b", "a", "b"]]);
    }

    #[test]
    fn test_no_returned_nodes_yield_empty_tuple() {
        // GIVEN a pattern that only asks whether a path exists
        let graph = InMemoryGraph::builder()
            .node("a", USER, attrs!())
            .node("b", USER, attrs!())
            .node("c", USER, attrs!())
            .edge("a", "b", "ab", FRIEND, attrs!())
            .edge("a", "c", "ac", FRIEND, attrs!())
            .build()
            .unwrap();
        let pattern = GraphPattern::builder()
            .node("me", USER)
            .node("friend", USER)
            .edge("me", "friend", "f", FRIEND)
            .fix("me", "a")
            .build()
            .unwrap();

        // WHEN evaluating
        let results = evaluate(&graph, &pattern).unwrap();

        // THEN the answer collapses to one empty tuple
        assert_eq!(results.len(), 1);
        assert!(results.iter().all(Vec::is_empty));
    }
}

mod unique_attributes {
    use super::*;

    fn graph() -> InMemoryGraph {
        InMemoryGraph::builder()
            .node("root", USER, attrs!())
            .node("u1", USER, attrs! { "email" => "one@x" })
            .node("u2", USER, attrs! { "email" => "two@x" })
            .node("u3", USER, attrs!())
            .edge("root", "u1", "r1", FRIEND, attrs!())
            .edge("root", "u2", "r2", FRIEND, attrs!())
            .edge("root", "u3", "r3", FRIEND, attrs!())
            .edge("u2", "u3", "23", FRIEND, attrs!())
            .unique_attribute(USER, "email")
            .build()
            .unwrap()
    }

    fn pattern(email: &str) -> GraphPattern {
        GraphPattern::builder()
            .node("root", USER)
            .node("friend", USER)
            .node("next", USER)
            .edge("root", "friend", "rf", FRIEND)
            .edge("friend", "next", "fn", FRIEND)
            .fix("root", "root")
            .require_node("friend", "email", RequirementOperator::Equal, email)
            .returns("friend")
            .returns("next")
            .build()
            .unwrap()
    }

    #[test]
    fn test_seeding_does_not_change_results() {
        let graph = graph();
        let seeded = Matcher::new(&graph);
        let unseeded = Matcher::new(&graph)
            .with_config(MatcherConfig::new().with_unique_attribute_seeding(false));

        for email in ["one@x", "two@x", "nobody@x"] {
            // GIVEN a pattern reachable from a fixed root either way
            let pattern = pattern(email);

            // WHEN evaluating with and without the unique-attribute fast path
            let fast = seeded.evaluate(&pattern).unwrap();
            let slow = unseeded.evaluate(&pattern).unwrap();

            // THEN the results agree
            assert_eq!(result_ids(&fast), result_ids(&slow), "email {}", email);
        }
        assert_eq!(
            result_ids(&seeded.evaluate(&pattern("two@x")).unwrap()),
            tuples![["u2", "u3"]]
        );
    }

    #[test]
    fn test_unique_lookup_is_used_when_enabled() {
        let traced = TracedGraph::new(graph());

        let results = Matcher::new(&traced).evaluate(&pattern("two@x")).unwrap();

        assert_eq!(result_ids(&results), tuples![["u2", "u3"]]);
        assert_eq!(traced.stats().unique_lookups, 1);
        assert_eq!(traced.stats().node_lookups, 1);

        traced.reset();
        Matcher::new(&traced)
            .with_config(MatcherConfig::new().with_unique_attribute_seeding(false))
            .evaluate(&pattern("two@x"))
            .unwrap();
        assert_eq!(traced.stats().unique_lookups, 0);
    }
}

mod instrumentation {
    use super::*;

    fn star() -> InMemoryGraph {
        InMemoryGraph::builder()
            .node("hub", USER, attrs!())
            .node("a", USER, attrs!())
            .node("b", USER, attrs!())
            .node("c", USER, attrs!())
            .edge("hub", "a", "ha", FRIEND, attrs!())
            .edge("hub", "b", "hb", FRIEND, attrs!())
            .edge("hub", "c", "hc", FRIEND, attrs!())
            .build()
            .unwrap()
    }

    fn friends_of_hub() -> GraphPattern {
        GraphPattern::builder()
            .node("me", USER)
            .node("friend", USER)
            .edge("me", "friend", "f", FRIEND)
            .fix("me", "hub")
            .returns("friend")
            .build()
            .unwrap()
    }

    #[test]
    fn test_traced_graph_counts_accesses() {
        // GIVEN a traced star graph
        let traced = TracedGraph::new(star());

        // WHEN listing the hub's friends
        let results = evaluate(&traced, &friends_of_hub()).unwrap();

        // THEN one lookup and one edge query did all the work
        assert_eq!(results.len(), 3);
        assert_eq!(
            traced.stats(),
            AccessStats {
                node_lookups: 1,
                unique_lookups: 0,
                edge_queries: 1,
                edges_returned: 3,
                attribute_reads: 0,
            }
        );
    }

    #[test]
    fn test_traced_graph_counts_attribute_reads() {
        // GIVEN a traced star graph whose edges carry a weight
        let traced = TracedGraph::new(
            InMemoryGraph::builder()
                .node("hub", USER, attrs!())
                .node("a", USER, attrs!())
                .node("b", USER, attrs!())
                .edge("hub", "a", "ha", FRIEND, attrs! { "weight" => 1 })
                .edge("hub", "b", "hb", FRIEND, attrs! { "weight" => 5 })
                .build()
                .unwrap(),
        );
        let pattern = GraphPattern::builder()
            .node("me", USER)
            .node("friend", USER)
            .edge("me", "friend", "f", FRIEND)
            .fix("me", "hub")
            .require_edge("f", "weight", RequirementOperator::LessThan, 3)
            .returns("friend")
            .build()
            .unwrap();

        // WHEN filtering the hub's friends by edge weight
        let results = evaluate(&traced, &pattern).unwrap();

        // THEN the weight of every candidate edge was read
        assert_eq!(result_ids(&results), tuples![["a"]]);
        assert!(traced.stats().attribute_reads >= 2);
    }

    #[test]
    fn test_counting_observer_sees_the_search() {
        let graph = star();
        let observer = CountingObserver::new();

        let results = Matcher::new(&graph)
            .with_observer(&observer)
            .evaluate(&friends_of_hub())
            .unwrap();

        let counts = observer.counts();
        assert_eq!(results.len(), 3);
        assert_eq!(counts.seeds, 1);
        assert_eq!(counts.seeds_missed, 0);
        assert_eq!(counts.results, 3);
        // one check for the hub, one per friend
        assert_eq!(counts.forward_checks, 4);
        assert_eq!(counts.failed_forward_checks, 0);
        assert_eq!(counts.neighbours_inspected, 3);
    }

    #[test]
    fn test_observer_does_not_change_results() {
        let graph = star();
        let observer = CountingObserver::new();

        let observed = Matcher::new(&graph)
            .with_observer(&observer)
            .evaluate(&friends_of_hub())
            .unwrap();
        let plain = evaluate(&graph, &friends_of_hub()).unwrap();

        assert_eq!(observed, plain);
    }
}
