use speculate2::speculate;

speculate! {
    use votes_core::models::{CreateFeatureInput, CreateVoteInput, Feature, ValidationError};
    use votes_core::{Database, DbError};

    fn setup_db() -> Database {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");
        db
    }

    fn create_test_feature(db: &Database, title: &str) -> Feature {
        db.create_feature(CreateFeatureInput {
            title: title.into(),
            description: format!("{title} description"),
            created_by: "tester".into(),
        })
        .expect("Failed to create feature")
    }

    fn vote(db: &Database, feature_id: i64, voter_id: &str) -> Result<votes_core::models::Vote, DbError> {
        db.cast_vote(CreateVoteInput {
            feature_id,
            voter_id: voter_id.into(),
        })
    }

    describe "features" {
        describe "create_feature" {
            it "assigns an id and starts with zero votes" {
                let db = setup_db();
                let feature = create_test_feature(&db, "Dark mode");

                assert!(feature.id > 0);
                assert_eq!(feature.vote_count, 0);
                assert_eq!(feature.title, "Dark mode");
            }

            it "stores trimmed fields" {
                let db = setup_db();
                let feature = db.create_feature(CreateFeatureInput {
                    title: "  Export  ".into(),
                    description: " CSV export\n".into(),
                    created_by: "  carol ".into(),
                }).unwrap();

                let stored = db.get_feature(feature.id).unwrap().unwrap();
                assert_eq!(stored.title, "Export");
                assert_eq!(stored.description, "CSV export");
                assert_eq!(stored.created_by, "carol");
                assert_eq!(stored, feature);
            }

            it "rejects a blank title without inserting a row" {
                let db = setup_db();
                let err = db.create_feature(CreateFeatureInput {
                    title: "   ".into(),
                    description: "desc".into(),
                    created_by: "tester".into(),
                }).unwrap_err();

                assert!(matches!(err, DbError::Invalid(ValidationError::EmptyTitle)));
                assert!(db.get_all_features().unwrap().is_empty());
            }

            it "rejects a blank description" {
                let db = setup_db();
                let err = db.create_feature(CreateFeatureInput {
                    title: "Title".into(),
                    description: "\t".into(),
                    created_by: "tester".into(),
                }).unwrap_err();

                assert!(matches!(err, DbError::Invalid(ValidationError::EmptyDescription)));
            }
        }

        describe "get_feature" {
            it "returns None for an unknown id" {
                let db = setup_db();
                assert!(db.get_feature(99_999).unwrap().is_none());
            }
        }

        describe "get_all_features" {
            it "returns an empty list when nothing exists" {
                let db = setup_db();
                assert!(db.get_all_features().unwrap().is_empty());
            }

            it "orders features newest first" {
                let db = setup_db();
                let first = create_test_feature(&db, "first");
                let second = create_test_feature(&db, "second");
                let third = create_test_feature(&db, "third");

                let ids: Vec<i64> = db.get_all_features().unwrap().iter().map(|f| f.id).collect();
                assert_eq!(ids, vec![third.id, second.id, first.id]);
            }

            it "keeps created_at non-increasing" {
                let db = setup_db();
                for i in 0..5 {
                    create_test_feature(&db, &format!("feature {i}"));
                }

                let features = db.get_all_features().unwrap();
                assert!(features.windows(2).all(|w| w[0].created_at >= w[1].created_at));
            }
        }
    }

    describe "votes" {
        describe "cast_vote" {
            it "records the vote and increments the count" {
                let db = setup_db();
                let feature = create_test_feature(&db, "Votable");

                let recorded = vote(&db, feature.id, "  voter1 ").unwrap();
                assert_eq!(recorded.feature_id, feature.id);
                assert_eq!(recorded.voter_id, "voter1");

                let feature = db.get_feature(feature.id).unwrap().unwrap();
                assert_eq!(feature.vote_count, 1);
            }

            it "counts votes from different voters" {
                let db = setup_db();
                let feature = create_test_feature(&db, "Popular");

                vote(&db, feature.id, "alice").unwrap();
                vote(&db, feature.id, "bob").unwrap();

                let feature = db.get_feature(feature.id).unwrap().unwrap();
                assert_eq!(feature.vote_count, 2);
                assert_eq!(db.count_votes(feature.id).unwrap(), 2);
            }

            it "rejects a duplicate vote and leaves the count unchanged" {
                let db = setup_db();
                let feature = create_test_feature(&db, "Contested");

                vote(&db, feature.id, "alice").unwrap();
                let err = vote(&db, feature.id, "alice").unwrap_err();

                assert!(matches!(err, DbError::DuplicateVote { ref voter_id, .. } if voter_id == "alice"));
                let feature = db.get_feature(feature.id).unwrap().unwrap();
                assert_eq!(feature.vote_count, 1);
                assert_eq!(db.count_votes(feature.id).unwrap(), 1);
            }

            it "treats a padded voter id as the same voter" {
                let db = setup_db();
                let feature = create_test_feature(&db, "Padded");

                vote(&db, feature.id, "alice").unwrap();
                let err = vote(&db, feature.id, " alice ").unwrap_err();

                assert!(matches!(err, DbError::DuplicateVote { .. }));
            }

            it "lets one voter vote on several features" {
                let db = setup_db();
                let a = create_test_feature(&db, "a");
                let b = create_test_feature(&db, "b");

                vote(&db, a.id, "alice").unwrap();
                vote(&db, b.id, "alice").unwrap();

                assert_eq!(db.get_feature(a.id).unwrap().unwrap().vote_count, 1);
                assert_eq!(db.get_feature(b.id).unwrap().unwrap().vote_count, 1);
            }

            it "fails with not found for an unknown feature" {
                let db = setup_db();
                let err = vote(&db, 99_999, "alice").unwrap_err();

                assert!(matches!(err, DbError::FeatureNotFound(99_999)));
                assert_eq!(db.count_votes(99_999).unwrap(), 0);
            }

            it "reports a missing feature before a blank voter id" {
                let db = setup_db();
                let err = vote(&db, 99_999, "  ").unwrap_err();
                assert!(matches!(err, DbError::FeatureNotFound(_)));
            }

            it "rejects a blank voter id" {
                let db = setup_db();
                let feature = create_test_feature(&db, "Blank");

                let err = vote(&db, feature.id, " \t").unwrap_err();
                assert!(matches!(err, DbError::Invalid(ValidationError::EmptyVoterId)));
                assert_eq!(db.get_feature(feature.id).unwrap().unwrap().vote_count, 0);
            }
        }

        describe "concurrent voting" {
            it "accepts exactly one of many identical votes" {
                let db = setup_db();
                let feature = create_test_feature(&db, "Raced");

                let handles: Vec<_> = (0..8)
                    .map(|_| {
                        let db = db.clone();
                        let id = feature.id;
                        std::thread::spawn(move || vote(&db, id, "racer").is_ok())
                    })
                    .collect();
                let successes = handles
                    .into_iter()
                    .map(|h| h.join().unwrap())
                    .filter(|ok| *ok)
                    .count();

                assert_eq!(successes, 1);
                assert_eq!(db.get_feature(feature.id).unwrap().unwrap().vote_count, 1);
            }
        }
    }

    describe "file databases" {
        it "persists features across reopen" {
            let dir = tempfile::TempDir::new().unwrap();
            let url = format!("sqlite://{}", dir.path().join("votes.db").display());

            let id = {
                let db = Database::open(&url).unwrap();
                db.migrate().unwrap();
                let feature = create_test_feature(&db, "Durable");
                vote(&db, feature.id, "alice").unwrap();
                feature.id
            };

            let db = Database::open(&url).unwrap();
            db.migrate().unwrap();
            let feature = db.get_feature(id).unwrap().unwrap();
            assert_eq!(feature.title, "Durable");
            assert_eq!(feature.vote_count, 1);
        }
    }
}
