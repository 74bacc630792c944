//! Behavioural coverage for the in-memory store.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::Username;
use crate::test_support::{author, book, category, publisher, translator};

fn reader(name: &str) -> User {
    User::new(UserId::random(), Username::new(name).expect("username"))
}

fn score(value: i64) -> Score {
    Score::new(value).expect("score")
}

#[fixture]
fn store() -> MemoryStore {
    let store = MemoryStore::new();

    let mut emma = book(1, "Emma");
    emma.authors = vec![author(1, "Jane Austen"), author(2, "Austen Estate")];
    emma.price = 900;
    store.insert_book(emma);

    let mut inferno = book(2, "Inferno");
    inferno.authors = vec![author(3, "Dante")];
    inferno.translators = vec![translator(1, "Dorothy Sayers")];
    inferno.publisher = publisher(2, "Penguin");
    inferno.category = category(2, "Poetry");
    inferno.price = 1_500;
    store.insert_book(inferno);

    let mut ledger = book(3, "Ledger 100% Complete");
    ledger.price = 1_200;
    store.insert_book(ledger);

    store
}

#[rstest]
#[tokio::test]
async fn books_matching_several_authors_appear_once(store: MemoryStore) {
    let filter = BookFilter::from_pairs([("author", "austen")]);
    let slice = store
        .query_books(&filter, &BookOrdering::default(), 0, 10)
        .await
        .expect("query");

    assert_eq!(slice.count, 1);
    assert_eq!(slice.books.len(), 1);
    assert_eq!(slice.books[0].name, "Emma");
}

#[rstest]
#[case("search", "sayers", vec![2])]
#[case("search", "penguin", vec![2])]
#[case("category", "POETRY", vec![2])]
#[case("publisher", "default", vec![3, 1])]
#[case("search", "100%", vec![3])]
#[case("translator", "nobody", vec![])]
#[tokio::test]
async fn every_result_matches_the_filter(
    store: MemoryStore,
    #[case] key: &str,
    #[case] value: &str,
    #[case] expected: Vec<i64>,
) {
    let filter = BookFilter::from_pairs([(key, value)]);
    let slice = store
        .query_books(&filter, &BookOrdering::default(), 0, 10)
        .await
        .expect("query");

    let ids: Vec<i64> = slice.books.iter().map(|b| b.id.get()).collect();
    assert_eq!(ids, expected);
    assert_eq!(slice.count, expected.len() as u64);
}

#[rstest]
#[tokio::test]
async fn slices_follow_the_ordering(store: MemoryStore) {
    let ordering = BookOrdering::parse(Some("price"));
    let first = store
        .query_books(&BookFilter::default(), &ordering, 0, 2)
        .await
        .expect("first page");
    let second = store
        .query_books(&BookFilter::default(), &ordering, 2, 2)
        .await
        .expect("second page");

    let ids: Vec<i64> = first
        .books
        .iter()
        .chain(second.books.iter())
        .map(|b| b.id.get())
        .collect();
    assert_eq!(ids, vec![1, 3, 2]);
    assert_eq!(first.count, 3);
    assert_eq!(second.count, 3);
}

#[rstest]
#[tokio::test]
async fn second_rating_is_rejected_and_count_stays_one(store: MemoryStore) {
    let user = reader("critic");
    store.insert_user(user.clone());

    RatingRepository::create(&store, user.id(), BookId::new(1), score(4))
        .await
        .expect("first rating");
    let error = RatingRepository::create(&store, user.id(), BookId::new(1), score(2))
        .await
        .expect_err("duplicate");

    assert_eq!(error, RatingRepositoryError::duplicate());
    assert_eq!(store.rating_count(BookId::new(1)), 1);
}

#[rstest]
#[tokio::test]
async fn rating_summaries_average_scores(store: MemoryStore) {
    let first = reader("first");
    let second = reader("second");
    store.insert_user(first.clone());
    store.insert_user(second.clone());
    RatingRepository::create(&store, first.id(), BookId::new(2), score(4))
        .await
        .expect("rating");
    RatingRepository::create(&store, second.id(), BookId::new(2), score(5))
        .await
        .expect("rating");

    let summaries = store
        .summaries(&[BookId::new(1), BookId::new(2)])
        .await
        .expect("summaries");

    let summary = summaries.get(&BookId::new(2)).expect("rated book");
    assert!((summary.avg_rating - 4.5).abs() < f64::EPSILON);
    assert_eq!(summary.rating_count, 2);
    assert!(!summaries.contains_key(&BookId::new(1)));

    let mine = store
        .scores_by(first.id(), &[BookId::new(1), BookId::new(2)])
        .await
        .expect("scores");
    assert_eq!(mine.get(&BookId::new(2)).map(|s| s.get()), Some(4));
    assert!(!mine.contains_key(&BookId::new(1)));
}

#[rstest]
#[tokio::test]
async fn rating_unknown_users_and_books_fail(store: MemoryStore) {
    let stranger = UserId::random();
    let missing_user = RatingRepository::create(&store, &stranger, BookId::new(1), score(3))
        .await
        .expect_err("unknown user");
    assert!(matches!(missing_user, RatingRepositoryError::UserNotFound { .. }));

    let user = reader("critic");
    store.insert_user(user.clone());
    let missing_book = RatingRepository::create(&store, user.id(), BookId::new(99), score(3))
        .await
        .expect_err("unknown book");
    assert_eq!(missing_book, RatingRepositoryError::book_not_found(99_i64));
}

#[rstest]
#[tokio::test]
async fn favorite_toggle_creates_deletes_and_recreates(store: MemoryStore) {
    let owner = reader("collector");
    store.insert_user(owner.clone());
    let user = owner.id().clone();
    let book_id = BookId::new(2);

    let created = store.toggle(&user, book_id).await.expect("create");
    assert!(matches!(created, ToggleOutcome::Created(ref fav) if fav.book_id == book_id));
    assert!(store.favorite_set(&user).await.expect("set").contains(book_id));

    let removed = store.toggle(&user, book_id).await.expect("delete");
    assert_eq!(removed, ToggleOutcome::Removed);
    assert!(store.favorite_set(&user).await.expect("set").is_empty());

    let recreated = store.toggle(&user, book_id).await.expect("recreate");
    assert!(matches!(recreated, ToggleOutcome::Created(_)));
}

#[rstest]
#[tokio::test]
async fn favoriting_unknown_books_fails(store: MemoryStore) {
    let error = store
        .toggle(&UserId::random(), BookId::new(404))
        .await
        .expect_err("unknown book");
    assert_eq!(error, FavoriteRepositoryError::book_not_found(404_i64));
}

#[rstest]
#[tokio::test]
async fn favoriting_as_an_unknown_user_fails(store: MemoryStore) {
    let stranger = UserId::random();
    let error = store
        .toggle(&stranger, BookId::new(1))
        .await
        .expect_err("unknown user");
    assert_eq!(
        error,
        FavoriteRepositoryError::user_not_found(stranger.to_string())
    );
    assert!(store.favorite_set(&stranger).await.expect("set").is_empty());
}

#[rstest]
#[case(0, 5)]
#[case(5, 5)]
#[case(10, 2)]
#[tokio::test]
async fn favorite_slices_page_through_twelve(#[case] offset: u64, #[case] expected: usize) {
    let store = MemoryStore::new();
    let owner = reader("collector");
    store.insert_user(owner.clone());
    let user = owner.id().clone();
    for id in 1..=12 {
        store.insert_book(book(id, &format!("Book {id}")));
        store.toggle(&user, BookId::new(id)).await.expect("favorite");
    }

    let slice = store.slice_for(&user, offset, 5).await.expect("slice");
    assert_eq!(slice.count, 12);
    assert_eq!(slice.favorites.len(), expected);
    assert!(slice.favorites.iter().all(|fav| fav.user_id == user));
}

#[rstest]
#[tokio::test]
async fn only_approved_comments_are_listed(store: MemoryStore) {
    let user = reader("commenter");
    store.insert_user(user.clone());
    let approved = store.insert_comment(user.id(), BookId::new(1), "Great", CommentStatus::Approved);
    store.insert_comment(user.id(), BookId::new(1), "Pending", CommentStatus::Waiting);
    store.insert_comment(user.id(), BookId::new(1), "Spam", CommentStatus::NotApproved);
    store.insert_comment(user.id(), BookId::new(2), "Other", CommentStatus::Approved);

    let comments = store.list_approved(BookId::new(1)).await.expect("comments");

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, approved);
    assert!(comments.iter().all(|c| c.status == CommentStatus::Approved));
}

#[rstest]
#[tokio::test]
async fn new_comments_wait_for_moderation(store: MemoryStore) {
    let user = reader("commenter");
    store.insert_user(user.clone());
    let body = CommentBody::new("First!").expect("body");

    let comment = CommentRepository::create(&store, user.id(), BookId::new(1), &body)
        .await
        .expect("comment");

    assert_eq!(comment.status, CommentStatus::Waiting);
    assert_eq!(comment.username.as_ref(), "commenter");
    assert!(store.list_approved(BookId::new(1)).await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn referenced_publishers_and_categories_are_protected(store: MemoryStore) {
    let publisher_error = store.delete_publisher(2).await.expect_err("protected");
    assert_eq!(
        publisher_error,
        ReferenceEntityRepositoryError::protected("publisher", 2_i64)
    );
    let category_error = store.delete_category(2).await.expect_err("protected");
    assert_eq!(
        category_error,
        ReferenceEntityRepositoryError::protected("category", 2_i64)
    );

    assert!(store.has_publisher(2));
    assert!(store.has_category(2));
    assert!(store.find_book(BookId::new(2)).await.expect("find").is_some());
}

#[rstest]
#[tokio::test]
async fn unreferenced_reference_rows_are_deleted(store: MemoryStore) {
    store.insert_publisher(publisher(9, "Small Press"));
    store.insert_category(category(9, "Essays"));

    store.delete_publisher(9).await.expect("publisher deleted");
    store.delete_category(9).await.expect("category deleted");

    assert!(!store.has_publisher(9));
    assert!(!store.has_category(9));
    assert_eq!(
        store.delete_publisher(9).await.expect_err("gone"),
        ReferenceEntityRepositoryError::not_found("publisher", 9_i64)
    );
}
