//! Access policy tests against in-memory repository fakes.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use bookmart_core::error::{BookmartError, BookmartResult};
use bookmart_core::models::book::{Book, BookCategory, CreateBook, UpdateBook};
use bookmart_core::models::principal::{CredentialKind, Principal};
use bookmart_core::models::seller::{SellerContact, SellerProfile, SellerStatus};
use bookmart_core::policy::{self, Action, Resource};
use bookmart_core::repository::{BookRepository, SellerRepository};

#[derive(Default)]
struct FakeSellerRepo {
    profiles: Mutex<HashMap<String, SellerProfile>>,
}

impl FakeSellerRepo {
    fn with_active_seller(user_id: &str) -> Self {
        let repo = Self::default();
        repo.profiles.lock().unwrap().insert(
            user_id.to_string(),
            SellerProfile {
                user_id: user_id.to_string(),
                contact: SellerContact::default(),
                status: SellerStatus::Active,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        repo
    }
}

impl SellerRepository for FakeSellerRepo {
    async fn upsert(&self, profile: SellerProfile) -> BookmartResult<SellerProfile> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn find_by_user_id(&self, user_id: &str) -> BookmartResult<Option<SellerProfile>> {
        Ok(self.profiles.lock().unwrap().get(user_id).cloned())
    }
}

#[derive(Default)]
struct FakeBookRepo {
    books: Mutex<HashMap<Uuid, Book>>,
}

impl BookRepository for FakeBookRepo {
    async fn create(&self, input: CreateBook) -> BookmartResult<Book> {
        let book = Book {
            id: Uuid::new_v4(),
            title: input.title,
            author: input.author,
            category: input.category,
            description: input.description,
            price: input.price,
            cover_url: input.cover_url,
            content_url: input.content_url,
            seller_id: input.seller_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.books.lock().unwrap().insert(book.id, book.clone());
        Ok(book)
    }

    async fn get_by_id(&self, id: Uuid) -> BookmartResult<Book> {
        self.books
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(BookmartError::NotFound {
                entity: "book".into(),
                id: id.to_string(),
            })
    }

    async fn update(&self, id: Uuid, _input: UpdateBook) -> BookmartResult<Book> {
        self.get_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> BookmartResult<()> {
        self.books.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn list(&self, _category: Option<BookCategory>) -> BookmartResult<Vec<Book>> {
        Ok(self.books.lock().unwrap().values().cloned().collect())
    }
}

fn principal(subject: &str, admin: bool) -> Principal {
    Principal {
        subject_id: subject.to_string(),
        email: Some(format!("{subject}@example.com")),
        display_name: None,
        admin,
        credential: CredentialKind::Jwt,
    }
}

fn book_owned_by(seller_id: Option<&str>) -> Book {
    Book {
        id: Uuid::new_v4(),
        title: "Dune".into(),
        author: "Frank Herbert".into(),
        category: BookCategory::ScienceFiction,
        description: "A desert planet and its spice.".into(),
        price: 499.0,
        cover_url: "https://img.example.com/dune.jpg".into(),
        content_url: "https://files.example.com/dune.pdf".into(),
        seller_id: seller_id.map(String::from),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

const ALL_ACTIONS: [Action; 9] = [
    Action::CreateBook,
    Action::EditBook,
    Action::DeleteBook,
    Action::ViewAllBooks,
    Action::ApproveSellerRequest,
    Action::RejectSellerRequest,
    Action::ViewAllSellerRequests,
    Action::ViewDashboardAnalytics,
    Action::ViewOwnAnalytics,
];

#[tokio::test]
async fn admin_is_allowed_every_action() {
    let sellers = FakeSellerRepo::default();
    let admin = principal("admin-1", true);
    let someone_elses_book = book_owned_by(Some("seller-9"));

    for action in ALL_ACTIONS {
        assert!(
            policy::allow(&admin, action, Resource::Book(&someone_elses_book), &sellers)
                .await
                .unwrap(),
            "admin denied {action:?}"
        );
        assert!(
            policy::allow(&admin, action, Resource::None, &sellers)
                .await
                .unwrap()
        );
    }
}

#[tokio::test]
async fn plain_user_is_denied_seller_and_admin_actions() {
    let sellers = FakeSellerRepo::default();
    let user = principal("user-1", false);
    let book = book_owned_by(Some("seller-9"));

    assert!(
        !policy::allow(&user, Action::CreateBook, Resource::None, &sellers)
            .await
            .unwrap()
    );
    assert!(
        !policy::allow(&user, Action::EditBook, Resource::Book(&book), &sellers)
            .await
            .unwrap()
    );
    assert!(
        !policy::allow(&user, Action::ApproveSellerRequest, Resource::None, &sellers)
            .await
            .unwrap()
    );
    assert!(
        !policy::allow(&user, Action::ViewDashboardAnalytics, Resource::None, &sellers)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn view_all_books_is_public() {
    let sellers = FakeSellerRepo::default();
    let user = principal("user-1", false);

    assert!(
        policy::allow(&user, Action::ViewAllBooks, Resource::None, &sellers)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn active_seller_may_create_and_edit_own_books_only() {
    let sellers = FakeSellerRepo::with_active_seller("seller-1");
    let seller = principal("seller-1", false);

    assert!(
        policy::allow(&seller, Action::CreateBook, Resource::None, &sellers)
            .await
            .unwrap()
    );
    assert!(
        policy::allow(&seller, Action::ViewOwnAnalytics, Resource::None, &sellers)
            .await
            .unwrap()
    );

    let own = book_owned_by(Some("seller-1"));
    let other = book_owned_by(Some("seller-2"));
    let platform = book_owned_by(None);

    assert!(
        policy::allow(&seller, Action::EditBook, Resource::Book(&own), &sellers)
            .await
            .unwrap()
    );
    assert!(
        !policy::allow(&seller, Action::EditBook, Resource::Book(&other), &sellers)
            .await
            .unwrap()
    );
    assert!(
        !policy::allow(&seller, Action::DeleteBook, Resource::Book(&platform), &sellers)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn inactive_seller_profile_does_not_grant_create() {
    let sellers = FakeSellerRepo::with_active_seller("seller-1");
    sellers
        .upsert(SellerProfile {
            user_id: "seller-1".into(),
            contact: SellerContact::default(),
            status: SellerStatus::Inactive,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .await
        .unwrap();

    let seller = principal("seller-1", false);
    assert!(
        !policy::allow(&seller, Action::CreateBook, Resource::None, &sellers)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn seller_status_is_read_at_decision_time() {
    // Approval lands mid-session: the very next check must see it.
    let sellers = FakeSellerRepo::default();
    let seller = principal("seller-1", false);

    assert!(
        !policy::allow(&seller, Action::CreateBook, Resource::None, &sellers)
            .await
            .unwrap()
    );

    sellers
        .upsert(SellerProfile {
            user_id: "seller-1".into(),
            contact: SellerContact::default(),
            status: SellerStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .await
        .unwrap();

    assert!(
        policy::allow(&seller, Action::CreateBook, Resource::None, &sellers)
            .await
            .unwrap()
    );
}

#[test]
fn ownership_gate_matrix() {
    let admin = principal("admin-1", true);
    let owner = principal("seller-1", false);
    let other = principal("seller-2", false);

    let owned = book_owned_by(Some("seller-1"));
    let platform = book_owned_by(None);

    assert!(policy::can_mutate(&admin, &owned));
    assert!(policy::can_mutate(&admin, &platform));
    assert!(policy::can_mutate(&owner, &owned));
    assert!(!policy::can_mutate(&other, &owned));
    assert!(!policy::can_mutate(&owner, &platform));
}

#[tokio::test]
async fn mutation_gate_fetches_before_checking_ownership() {
    let books = FakeBookRepo::default();
    let admin = principal("admin-1", true);

    // Missing book is NotFound even for an admin.
    let err = policy::authorize_book_mutation(&admin, Uuid::new_v4(), &books)
        .await
        .unwrap_err();
    assert!(matches!(err, BookmartError::NotFound { .. }));

    let book = books
        .create(CreateBook {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            category: BookCategory::ScienceFiction,
            description: "A desert planet and its spice.".into(),
            price: 499.0,
            cover_url: "https://img.example.com/dune.jpg".into(),
            content_url: "https://files.example.com/dune.pdf".into(),
            seller_id: Some("seller-1".into()),
        })
        .await
        .unwrap();

    let stranger = principal("seller-2", false);
    let err = policy::authorize_book_mutation(&stranger, book.id, &books)
        .await
        .unwrap_err();
    assert!(matches!(err, BookmartError::Forbidden { .. }));

    let owner = principal("seller-1", false);
    let fetched = policy::authorize_book_mutation(&owner, book.id, &books)
        .await
        .unwrap();
    assert_eq!(fetched.id, book.id);
}
