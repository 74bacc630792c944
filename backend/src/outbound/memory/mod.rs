//! In-memory entity store implementing every driven port.
//!
//! Used when no database is configured and by HTTP tests. All state lives
//! behind one mutex, so each port call observes and mutates a consistent
//! snapshot; listings evaluate the same [`BookFilter`] and [`BookOrdering`]
//! semantics the SQL adapter compiles.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::ports::{
    BookRepository, BookRepositoryError, BookSlice, CommentRepository, CommentRepositoryError,
    FavoriteRepository, FavoriteRepositoryError, FavoriteSlice, RatingRepository,
    RatingRepositoryError, ReferenceEntityRepository, ReferenceEntityRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Book, BookFilter, BookId, BookImage, BookOrdering, Category, Comment, CommentBody,
    CommentStatus, Favorite, FavoriteSet, Publisher, Rating, RatingSummary, Score,
    ToggleOutcome, User, UserId,
};

#[derive(Debug, Clone)]
struct StoredComment {
    id: i64,
    user_id: UserId,
    book_id: BookId,
    body: String,
    status: CommentStatus,
    datetime_created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredRating {
    id: i64,
    user_id: UserId,
    book_id: BookId,
    score: Score,
    datetime_created: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, User>,
    books: BTreeMap<BookId, Book>,
    publishers: BTreeMap<i64, Publisher>,
    categories: BTreeMap<i64, Category>,
    comments: Vec<StoredComment>,
    favorites: Vec<Favorite>,
    ratings: Vec<StoredRating>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn has_book(&self, book_id: BookId) -> bool {
        self.books.contains_key(&book_id)
    }

    fn favorite_index(&self, user_id: &UserId, book_id: BookId) -> Option<usize> {
        self.favorites
            .iter()
            .position(|fav| fav.user_id == *user_id && fav.book_id == book_id)
    }
}

/// Mutex-guarded store implementing the catalogue's driven ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add or replace a book, registering its publisher and category.
    pub fn insert_book(&self, book: Book) {
        let mut state = self.lock();
        state
            .publishers
            .insert(book.publisher.id, book.publisher.clone());
        state
            .categories
            .insert(book.category.id, book.category.clone());
        state.last_id = state.last_id.max(book.id.get());
        state.books.insert(book.id, book);
    }

    /// Register a publisher without books.
    pub fn insert_publisher(&self, publisher: Publisher) {
        self.lock().publishers.insert(publisher.id, publisher);
    }

    /// Register a category without books.
    pub fn insert_category(&self, category: Category) {
        self.lock().categories.insert(category.id, category);
    }

    /// Whether a publisher with `id` is stored.
    pub fn has_publisher(&self, id: i64) -> bool {
        self.lock().publishers.contains_key(&id)
    }

    /// Whether a category with `id` is stored.
    pub fn has_category(&self, id: i64) -> bool {
        self.lock().categories.contains_key(&id)
    }

    /// Add or replace a user.
    pub fn insert_user(&self, user: User) {
        self.lock().users.insert(user.id().clone(), user);
    }

    /// Whether a user with `id` is stored.
    pub fn has_user(&self, id: &UserId) -> bool {
        self.lock().users.contains_key(id)
    }

    /// Store a comment with an explicit moderation status, returning its id.
    pub fn insert_comment(
        &self,
        user_id: &UserId,
        book_id: BookId,
        body: &str,
        status: CommentStatus,
    ) -> i64 {
        let mut state = self.lock();
        let id = state.next_id();
        state.comments.push(StoredComment {
            id,
            user_id: user_id.clone(),
            book_id,
            body: body.to_owned(),
            status,
            datetime_created: Utc::now(),
        });
        id
    }

    /// Number of ratings stored for `book_id`.
    pub fn rating_count(&self, book_id: BookId) -> usize {
        self.lock()
            .ratings
            .iter()
            .filter(|rating| rating.book_id == book_id)
            .count()
    }
}

#[async_trait]
impl BookRepository for MemoryStore {
    async fn query_books(
        &self,
        filter: &BookFilter,
        ordering: &BookOrdering,
        offset: u64,
        limit: u64,
    ) -> Result<BookSlice, BookRepositoryError> {
        let state = self.lock();
        let mut matching: Vec<&Book> = state
            .books
            .values()
            .filter(|book| filter.matches(book))
            .collect();
        matching.sort_by(|left, right| ordering.compare(left, right));

        let count = matching.len() as u64;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let books = matching.into_iter().skip(skip).take(take).cloned().collect();
        Ok(BookSlice { count, books })
    }

    async fn find_book(&self, book_id: BookId) -> Result<Option<Book>, BookRepositoryError> {
        Ok(self.lock().books.get(&book_id).cloned())
    }

    async fn list_images(&self, book_id: BookId) -> Result<Vec<BookImage>, BookRepositoryError> {
        Ok(self
            .lock()
            .books
            .get(&book_id)
            .map(|book| book.images.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl RatingRepository for MemoryStore {
    async fn summaries(
        &self,
        book_ids: &[BookId],
    ) -> Result<HashMap<BookId, RatingSummary>, RatingRepositoryError> {
        let state = self.lock();
        let mut grouped: HashMap<BookId, Vec<Score>> = HashMap::new();
        for rating in state
            .ratings
            .iter()
            .filter(|rating| book_ids.contains(&rating.book_id))
        {
            grouped.entry(rating.book_id).or_default().push(rating.score);
        }
        Ok(grouped
            .into_iter()
            .filter_map(|(book_id, scores)| {
                RatingSummary::from_scores(scores).map(|summary| (book_id, summary))
            })
            .collect())
    }

    async fn scores_by(
        &self,
        user_id: &UserId,
        book_ids: &[BookId],
    ) -> Result<HashMap<BookId, Score>, RatingRepositoryError> {
        Ok(self
            .lock()
            .ratings
            .iter()
            .filter(|rating| rating.user_id == *user_id && book_ids.contains(&rating.book_id))
            .map(|rating| (rating.book_id, rating.score))
            .collect())
    }

    async fn list_for(
        &self,
        user_id: &UserId,
        book_id: BookId,
    ) -> Result<Vec<Rating>, RatingRepositoryError> {
        let state = self.lock();
        let Some(user) = state.users.get(user_id) else {
            return Ok(Vec::new());
        };
        let mut ratings: Vec<Rating> = state
            .ratings
            .iter()
            .filter(|rating| rating.user_id == *user_id && rating.book_id == book_id)
            .map(|rating| Rating {
                id: rating.id,
                user: user.clone(),
                book_id: rating.book_id,
                score: rating.score,
                datetime_created: rating.datetime_created,
            })
            .collect();
        ratings.sort_by(|a, b| {
            b.datetime_created
                .cmp(&a.datetime_created)
                .then(b.id.cmp(&a.id))
        });
        Ok(ratings)
    }

    async fn create(
        &self,
        user_id: &UserId,
        book_id: BookId,
        score: Score,
    ) -> Result<Rating, RatingRepositoryError> {
        let mut state = self.lock();
        if !state.has_book(book_id) {
            return Err(RatingRepositoryError::book_not_found(book_id.get()));
        }
        let Some(user) = state.users.get(user_id).cloned() else {
            return Err(RatingRepositoryError::user_not_found(user_id.to_string()));
        };
        let duplicate = state
            .ratings
            .iter()
            .any(|rating| rating.user_id == *user_id && rating.book_id == book_id);
        if duplicate {
            return Err(RatingRepositoryError::duplicate());
        }

        let stored = StoredRating {
            id: state.next_id(),
            user_id: user_id.clone(),
            book_id,
            score,
            datetime_created: Utc::now(),
        };
        state.ratings.push(stored.clone());
        Ok(Rating {
            id: stored.id,
            user,
            book_id,
            score,
            datetime_created: stored.datetime_created,
        })
    }
}

#[async_trait]
impl FavoriteRepository for MemoryStore {
    async fn favorite_set(&self, user_id: &UserId) -> Result<FavoriteSet, FavoriteRepositoryError> {
        Ok(self
            .lock()
            .favorites
            .iter()
            .filter(|fav| fav.user_id == *user_id)
            .map(|fav| fav.book_id)
            .collect())
    }

    async fn slice_for(
        &self,
        user_id: &UserId,
        offset: u64,
        limit: u64,
    ) -> Result<FavoriteSlice, FavoriteRepositoryError> {
        let state = self.lock();
        let mut owned: Vec<&Favorite> = state
            .favorites
            .iter()
            .filter(|fav| fav.user_id == *user_id)
            .collect();
        owned.sort_by(|a, b| {
            b.datetime_created
                .cmp(&a.datetime_created)
                .then(b.id.cmp(&a.id))
        });
        let count = owned.len() as u64;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(FavoriteSlice {
            count,
            favorites: owned.into_iter().skip(skip).take(take).cloned().collect(),
        })
    }

    async fn toggle(
        &self,
        user_id: &UserId,
        book_id: BookId,
    ) -> Result<ToggleOutcome, FavoriteRepositoryError> {
        let mut state = self.lock();
        if let Some(index) = state.favorite_index(user_id, book_id) {
            state.favorites.remove(index);
            return Ok(ToggleOutcome::Removed);
        }
        if !state.has_book(book_id) {
            return Err(FavoriteRepositoryError::book_not_found(book_id.get()));
        }
        if !state.users.contains_key(user_id) {
            return Err(FavoriteRepositoryError::user_not_found(user_id.to_string()));
        }
        let favorite = Favorite {
            id: state.next_id(),
            user_id: user_id.clone(),
            book_id,
            datetime_created: Utc::now(),
        };
        state.favorites.push(favorite.clone());
        Ok(ToggleOutcome::Created(favorite))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn list_approved(&self, book_id: BookId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.lock();
        let mut approved: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.book_id == book_id && c.status == CommentStatus::Approved)
            .filter_map(|c| {
                let user = state.users.get(&c.user_id)?;
                Some(Comment {
                    id: c.id,
                    username: user.username().clone(),
                    book_id: c.book_id,
                    body: c.body.clone(),
                    status: c.status,
                    datetime_created: c.datetime_created,
                })
            })
            .collect();
        approved.sort_by(|a, b| {
            b.datetime_created
                .cmp(&a.datetime_created)
                .then(b.id.cmp(&a.id))
        });
        Ok(approved)
    }

    async fn create(
        &self,
        user_id: &UserId,
        book_id: BookId,
        body: &CommentBody,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut state = self.lock();
        if !state.has_book(book_id) {
            return Err(CommentRepositoryError::book_not_found(book_id.get()));
        }
        let Some(username) = state.users.get(user_id).map(|u| u.username().clone()) else {
            return Err(CommentRepositoryError::user_not_found(user_id.to_string()));
        };
        let stored = StoredComment {
            id: state.next_id(),
            user_id: user_id.clone(),
            book_id,
            body: body.as_str().to_owned(),
            status: CommentStatus::default(),
            datetime_created: Utc::now(),
        };
        state.comments.push(stored.clone());
        Ok(Comment {
            id: stored.id,
            username,
            book_id,
            body: stored.body,
            status: stored.status,
            datetime_created: stored.datetime_created,
        })
    }
}

#[async_trait]
impl ReferenceEntityRepository for MemoryStore {
    async fn delete_publisher(&self, id: i64) -> Result<(), ReferenceEntityRepositoryError> {
        let mut state = self.lock();
        if !state.publishers.contains_key(&id) {
            return Err(ReferenceEntityRepositoryError::not_found("publisher", id));
        }
        if state.books.values().any(|book| book.publisher.id == id) {
            return Err(ReferenceEntityRepositoryError::protected("publisher", id));
        }
        state.publishers.remove(&id);
        debug!(publisher_id = id, "publisher removed from memory store");
        Ok(())
    }

    async fn delete_category(&self, id: i64) -> Result<(), ReferenceEntityRepositoryError> {
        let mut state = self.lock();
        if !state.categories.contains_key(&id) {
            return Err(ReferenceEntityRepositoryError::not_found("category", id));
        }
        if state.books.values().any(|book| book.category.id == id) {
            return Err(ReferenceEntityRepositoryError::protected("category", id));
        }
        state.categories.remove(&id);
        debug!(category_id = id, "category removed from memory store");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.insert_user(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.get(id).cloned())
    }
}

#[cfg(test)]
mod tests;
