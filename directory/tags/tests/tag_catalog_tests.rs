// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use trustlist_core::domain::contact::{Contact, ContactId, NewContact, TrustLevel};
use trustlist_core::domain::repository::{
    ContactMutation, ContactRepository, ContactRevision, RepositoryError,
};
use trustlist_core::infrastructure::event_bus::EventBus;
use trustlist_core::infrastructure::repositories::InMemoryContactRepository;
use trustlist_core::infrastructure::seed as contact_seed;
use trustlist_tags::application::{StandardTagCatalogService, TagCatalogService};
use trustlist_tags::domain::{Tag, TagDraft, TagError, TagId, TagRepository};
use trustlist_tags::infrastructure::{seed, InMemoryTagRepository};

struct Fixture {
    service: StandardTagCatalogService,
    contacts: Arc<InMemoryContactRepository>,
    event_bus: Arc<EventBus>,
}

fn fixture() -> Fixture {
    let contacts = Arc::new(InMemoryContactRepository::with_contacts(
        contact_seed::default_contacts().unwrap(),
    ));
    let tags = Arc::new(InMemoryTagRepository::with_tags(seed::default_tags().unwrap()));
    let event_bus = Arc::new(EventBus::new(32));
    let service = StandardTagCatalogService::new(tags, contacts.clone(), event_bus.clone());
    Fixture {
        service,
        contacts,
        event_bus,
    }
}

#[tokio::test]
async fn test_usage_counts_come_from_contacts() {
    let f = fixture();
    let developer = f.service.get_tag("Developer").await.unwrap();
    // Alice and Grace
    assert_eq!(developer.usage_count, 2);

    let exchange = f.service.get_tag("Exchange").await.unwrap();
    assert_eq!(exchange.usage_count, 0);
}

#[tokio::test]
async fn test_search_matches_name_and_description() {
    let f = fixture();
    let by_description = f.service.list_tags("fraudulent").await.unwrap();
    assert_eq!(by_description.len(), 1);
    assert_eq!(by_description[0].tag.name, "Potential Scam");

    let all = f.service.list_tags("").await.unwrap();
    assert_eq!(all.len(), 8);
}

#[tokio::test]
async fn test_paging() {
    let f = fixture();
    let service = f.service.with_page_size(3);
    let page = service.list_page("", 3).await.unwrap();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[1].tag.name, "Exchange");
}

#[tokio::test]
async fn test_create_rejects_duplicates_and_blank_names() {
    let f = fixture();
    let err = f.service.create_tag(TagDraft::new(" Client ")).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<TagError>(),
        Some(&TagError::DuplicateName("Client".to_string()))
    );

    let err = f.service.create_tag(TagDraft::new("")).await.unwrap_err();
    assert_eq!(err.downcast_ref::<TagError>(), Some(&TagError::EmptyName));

    let created = f
        .service
        .create_tag(TagDraft::new("Auditor").with_modifier(7))
        .await
        .unwrap();
    assert_eq!(created.trust_modifier.value(), 5);
    assert_eq!(f.service.list_tags("").await.unwrap().len(), 9);
}

#[tokio::test]
async fn test_rename_rewrites_contact_tags() {
    let f = fixture();
    let mut events = f.event_bus.subscribe();

    let renamed = f
        .service
        .update_tag("Developer", TagDraft::new("Engineer").with_modifier(1))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Engineer");

    let alice = f.contacts.find_by_id(&ContactId::from("1")).await.unwrap().unwrap();
    assert_eq!(alice.tags.iter().collect::<Vec<_>>(), vec!["Engineer", "Trusted Partner"]);
    assert_eq!(f.service.get_tag("Engineer").await.unwrap().usage_count, 2);
    assert!(f.service.get_tag("Developer").await.is_err());
    assert_eq!(events.recv().await.unwrap().event_type(), "tag_updated");
}

#[tokio::test]
async fn test_rename_to_existing_name_is_rejected() {
    let f = fixture();
    let result = f.service.update_tag("Developer", TagDraft::new("Client")).await;
    assert!(result.is_err());
    assert!(f.service.get_tag("Developer").await.is_ok());
}

#[tokio::test]
async fn test_delete_keeps_contacts_tagged() {
    let f = fixture();
    f.service.delete_tag("Flagged").await.unwrap();
    assert!(f.service.get_tag("Flagged").await.is_err());

    let flagged = f.contacts.find_by_id(&ContactId::from("3")).await.unwrap().unwrap();
    assert!(flagged.tags.contains("Flagged"));

    let missing = f.service.delete_tag("Flagged").await.unwrap_err();
    assert!(matches!(missing.downcast_ref::<TagError>(), Some(TagError::NotFound(_))));
}

#[tokio::test]
async fn test_bulk_delete_skips_unknown_names() {
    let f = fixture();
    let mut events = f.event_bus.subscribe();
    let removed = f
        .service
        .delete_tags(&["Client".to_string(), "Exchange".to_string(), "Nope".to_string()])
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(f.service.list_tags("").await.unwrap().len(), 6);
    assert_eq!(events.recv().await.unwrap().summary(), "2 tag(s) deleted");

    assert_eq!(f.service.delete_tags(&["Nope".to_string()]).await.unwrap(), 0);
}

/// Contact store that stalls inside reads and tag renames, widening the window
/// for a concurrent writer.
struct SlowContacts {
    inner: InMemoryContactRepository,
    delay: Duration,
}

#[async_trait]
impl ContactRepository for SlowContacts {
    async fn save(&self, contact: &Contact) -> Result<(), RepositoryError> {
        self.inner.save(contact).await
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, RepositoryError> {
        self.inner.find_by_id(id).await
    }

    async fn list_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        let contacts = self.inner.list_all().await?;
        tokio::time::sleep(self.delay).await;
        Ok(contacts)
    }

    async fn replace_all(&self, contacts: Vec<Contact>) -> Result<(), RepositoryError> {
        self.inner.replace_all(contacts).await
    }

    async fn delete(&self, id: &ContactId) -> Result<bool, RepositoryError> {
        self.inner.delete(id).await
    }

    async fn modify(
        &self,
        id: &ContactId,
        mutation: ContactMutation,
    ) -> Result<Option<ContactRevision>, RepositoryError> {
        self.inner.modify(id, mutation).await
    }

    async fn rename_tag(&self, from: &str, to: &str) -> Result<usize, RepositoryError> {
        tokio::time::sleep(self.delay).await;
        self.inner.rename_tag(from, to).await
    }

    async fn set_trust_levels(
        &self,
        ids: &HashSet<ContactId>,
        level: TrustLevel,
    ) -> Result<Vec<ContactId>, RepositoryError> {
        self.inner.set_trust_levels(ids, level).await
    }

    async fn delete_many(&self, ids: &HashSet<ContactId>) -> Result<Vec<ContactId>, RepositoryError> {
        self.inner.delete_many(ids).await
    }
}

#[tokio::test]
async fn test_rename_keeps_contacts_added_meanwhile() {
    let inner = InMemoryContactRepository::with_contacts(contact_seed::default_contacts().unwrap());
    let contacts = Arc::new(SlowContacts {
        inner: inner.clone(),
        delay: Duration::from_millis(100),
    });
    let tags = Arc::new(InMemoryTagRepository::with_tags(seed::default_tags().unwrap()));
    let service = StandardTagCatalogService::new(tags, contacts, Arc::new(EventBus::new(32)));

    let newcomer = Contact::create(
        NewContact::new("0x00000000000000000000000000000000000000aa"),
        TrustLevel::DEFAULT,
    )
    .unwrap();
    let add = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        inner.save(&newcomer).await.unwrap();
    };

    let (renamed, ()) = tokio::join!(service.update_tag("Developer", TagDraft::new("Dev")), add);
    renamed.unwrap();

    assert_eq!(inner.len(), 11);
    assert!(inner.find_by_id(&newcomer.id).await.unwrap().is_some());
    let alice = inner.find_by_id(&ContactId::from("1")).await.unwrap().unwrap();
    assert!(alice.tags.contains("Dev"));
}

/// Tag store whose writes always fail.
struct ReadOnlyTags(InMemoryTagRepository);

#[async_trait]
impl TagRepository for ReadOnlyTags {
    async fn save(&self, _tag: &Tag) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unknown("tag store is read-only".to_string()))
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, RepositoryError> {
        self.0.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepositoryError> {
        self.0.find_by_name(name).await
    }

    async fn list_all(&self) -> Result<Vec<Tag>, RepositoryError> {
        self.0.list_all().await
    }

    async fn delete_many(&self, ids: &HashSet<TagId>) -> Result<Vec<Tag>, RepositoryError> {
        self.0.delete_many(ids).await
    }
}

#[tokio::test]
async fn test_failed_rename_leaves_contacts_on_old_name() {
    let contacts = Arc::new(InMemoryContactRepository::with_contacts(
        contact_seed::default_contacts().unwrap(),
    ));
    let tags = Arc::new(ReadOnlyTags(InMemoryTagRepository::with_tags(
        seed::default_tags().unwrap(),
    )));
    let event_bus = Arc::new(EventBus::new(32));
    let mut events = event_bus.subscribe();
    let service = StandardTagCatalogService::new(tags, contacts.clone(), event_bus);

    let result = service
        .update_tag("Developer", TagDraft::new("Engineer").with_modifier(1))
        .await;
    assert!(result.is_err());

    let developer = service.get_tag("Developer").await.unwrap();
    assert_eq!(developer.usage_count, 2);
    let alice = contacts.find_by_id(&ContactId::from("1")).await.unwrap().unwrap();
    assert!(alice.tags.contains("Developer"));
    assert!(!alice.tags.contains("Engineer"));
    assert!(events.try_recv().is_err());
}
