// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Common tests for any database implementation.

use crate::db::testutils::*;
use crate::db::*;
use crate::model::*;
use stayhub_authn::model::HashedPassword;
use stayhub_core::db::{Db, DbError};
use std::sync::Arc;
use time::macros::datetime;

pub(crate) async fn test_users_upsert_and_get(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user = NewUser {
        username: "jdoe".to_owned(),
        name: "John Doe".to_owned(),
        email: "jdoe@example.com".to_owned(),
        phone_number: Some("555-0101".to_owned()),
        profile_picture: Some("https://example.com/jdoe.png".to_owned()),
    };
    let stored = upsert_user(tx.ex(), &user, &HashedPassword::new("hash1")).await.unwrap();
    assert_eq!("jdoe", stored.username);
    assert_eq!(HashedPassword::new("hash1"), stored.password);
    assert_eq!(Some("555-0101"), stored.phone_number.as_deref());
    assert_eq!(stored, get_user(tx.ex(), &stored.id).await.unwrap());
    assert_eq!(stored, get_user_by_username(tx.ex(), "jdoe").await.unwrap());

    let user = NewUser {
        username: "jdoe".to_owned(),
        name: "Johnny Doe".to_owned(),
        email: "johnny@example.com".to_owned(),
        phone_number: None,
        profile_picture: Some("https://example.com/johnny.png".to_owned()),
    };
    let updated = upsert_user(tx.ex(), &user, &HashedPassword::new("hash2")).await.unwrap();
    assert_eq!(stored.id, updated.id);
    assert_eq!("Johnny Doe", updated.name);
    assert_eq!("johnny@example.com", updated.email);
    assert_eq!(HashedPassword::new("hash2"), updated.password);
    assert_eq!(Some("555-0101"), updated.phone_number.as_deref());
    assert_eq!(Some("https://example.com/johnny.png"), updated.profile_picture.as_deref());

    assert_eq!(1, list_users(tx.ex(), &UserFilter::default()).await.unwrap().len());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_users_get_not_found(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    create_simple_user(tx.ex(), "someone").await;
    assert_eq!(DbError::NotFound, get_user(tx.ex(), &UserId::new("missing")).await.unwrap_err());
    assert_eq!(DbError::NotFound, get_user_by_username(tx.ex(), "other").await.unwrap_err());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_users_list_filters(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let alice = create_simple_user(tx.ex(), "Alice").await;
    let bob = create_simple_user(tx.ex(), "bob").await;
    let alicia = create_simple_user(tx.ex(), "alicia").await;

    let all = list_users(tx.ex(), &UserFilter::default()).await.unwrap();
    assert_eq!(vec![alice.clone(), alicia.clone(), bob.clone()], all);

    let filter = UserFilter { username: Some("ALI".to_owned()), email: None };
    assert_eq!(vec![alice.clone(), alicia], list_users(tx.ex(), &filter).await.unwrap());

    let filter = UserFilter { username: Some("ali".to_owned()), email: Some("ce@".to_owned()) };
    assert_eq!(vec![alice], list_users(tx.ex(), &filter).await.unwrap());

    let filter = UserFilter { username: None, email: Some("BOB@EXAMPLE".to_owned()) };
    assert_eq!(vec![bob], list_users(tx.ex(), &filter).await.unwrap());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_users_update(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user = create_simple_user(tx.ex(), "first").await;
    create_simple_user(tx.ex(), "second").await;

    update_user(tx.ex(), &user.id, &UserUpdate::default()).await.unwrap();
    assert_eq!(user, get_user(tx.ex(), &user.id).await.unwrap());

    let update = UserUpdate {
        name: Some("New name".to_owned()),
        phone_number: Some("555-0199".to_owned()),
        ..Default::default()
    };
    update_user(tx.ex(), &user.id, &update).await.unwrap();
    let updated = get_user(tx.ex(), &user.id).await.unwrap();
    assert_eq!(
        User {
            name: "New name".to_owned(),
            phone_number: Some("555-0199".to_owned()),
            ..user.clone()
        },
        updated
    );

    assert_eq!(
        DbError::NotFound,
        update_user(tx.ex(), &UserId::new("missing"), &update).await.unwrap_err()
    );

    let update = UserUpdate { username: Some("second".to_owned()), ..Default::default() };
    assert_eq!(DbError::AlreadyExists, update_user(tx.ex(), &user.id, &update).await.unwrap_err());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_users_delete(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user = create_simple_user(tx.ex(), "to-delete").await;
    delete_user(tx.ex(), &user.id).await.unwrap();
    assert_eq!(DbError::NotFound, get_user(tx.ex(), &user.id).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_user(tx.ex(), &user.id).await.unwrap_err());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_users_delete_with_bookings(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user = create_simple_user(tx.ex(), "guest").await;
    let host = create_simple_host(tx.ex(), "owner").await;
    let property = create_simple_property(tx.ex(), &host.id, "Loft", "Paris", 100.0, vec![]).await;
    create_simple_booking(tx.ex(), &user.id, &property.id).await;

    assert_eq!(DbError::ForeignKeyViolation, delete_user(tx.ex(), &user.id).await.unwrap_err());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_hosts_crud(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let host = NewHost {
        username: "hosty".to_owned(),
        name: "Hosty McHostface".to_owned(),
        email: Some("hosty@example.com".to_owned()),
        phone_number: "555-0200".to_owned(),
        profile_picture: None,
        about_me: Some("I like guests".to_owned()),
    };
    let stored = upsert_host(tx.ex(), &host).await.unwrap();
    assert_eq!(stored, get_host(tx.ex(), &stored.id).await.unwrap());

    let host = NewHost {
        name: "Hosty".to_owned(),
        email: None,
        about_me: None,
        profile_picture: Some("https://example.com/hosty.png".to_owned()),
        ..host
    };
    let upserted = upsert_host(tx.ex(), &host).await.unwrap();
    assert_eq!(
        Host {
            name: "Hosty".to_owned(),
            profile_picture: Some("https://example.com/hosty.png".to_owned()),
            ..stored.clone()
        },
        upserted
    );

    let update = HostUpdate { about_me: Some("Changed".to_owned()), ..Default::default() };
    update_host(tx.ex(), &stored.id, &update).await.unwrap();
    assert_eq!(Some("Changed"), get_host(tx.ex(), &stored.id).await.unwrap().about_me.as_deref());
    assert_eq!(
        DbError::NotFound,
        update_host(tx.ex(), &HostId::new("missing"), &update).await.unwrap_err()
    );

    delete_host(tx.ex(), &stored.id).await.unwrap();
    assert_eq!(DbError::NotFound, get_host(tx.ex(), &stored.id).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_host(tx.ex(), &stored.id).await.unwrap_err());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_hosts_list_filter(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let host1 = create_simple_host(tx.ex(), "sunny-beach").await;
    let host2 = create_simple_host(tx.ex(), "Beachfront").await;
    let host3 = create_simple_host(tx.ex(), "mountain").await;

    let all = list_hosts(tx.ex(), &HostFilter::default()).await.unwrap();
    assert_eq!(vec![host2.clone(), host3, host1.clone()], all);

    let filter = HostFilter { name: Some("beach".to_owned()) };
    assert_eq!(vec![host2, host1], list_hosts(tx.ex(), &filter).await.unwrap());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_amenities_crud(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let wifi = create_amenity(tx.ex(), &NewAmenity { name: "Wifi".to_owned() }).await.unwrap();
    let pool = create_amenity(tx.ex(), &NewAmenity { name: "Pool".to_owned() }).await.unwrap();
    assert_eq!(wifi, get_amenity(tx.ex(), &wifi.id).await.unwrap());
    assert_eq!(vec![pool.clone(), wifi.clone()], list_amenities(tx.ex()).await.unwrap());

    let update = AmenityUpdate { name: Some("Fast wifi".to_owned()) };
    update_amenity(tx.ex(), &wifi.id, &update).await.unwrap();
    assert_eq!("Fast wifi", get_amenity(tx.ex(), &wifi.id).await.unwrap().name);
    update_amenity(tx.ex(), &wifi.id, &AmenityUpdate::default()).await.unwrap();
    assert_eq!("Fast wifi", get_amenity(tx.ex(), &wifi.id).await.unwrap().name);

    delete_amenity(tx.ex(), &pool.id).await.unwrap();
    assert_eq!(DbError::NotFound, get_amenity(tx.ex(), &pool.id).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_amenity(tx.ex(), &pool.id).await.unwrap_err());
    assert_eq!(
        DbError::NotFound,
        update_amenity(tx.ex(), &pool.id, &AmenityUpdate::default()).await.unwrap_err()
    );

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_amenities_delete_unlinks_properties(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let wifi = create_amenity(tx.ex(), &NewAmenity { name: "Wifi".to_owned() }).await.unwrap();
    let pool = create_amenity(tx.ex(), &NewAmenity { name: "Pool".to_owned() }).await.unwrap();
    let host = create_simple_host(tx.ex(), "host").await;
    let property = create_simple_property(
        tx.ex(),
        &host.id,
        "Villa",
        "Ibiza",
        300.0,
        vec![wifi.id.clone(), pool.id.clone()],
    )
    .await;
    assert_eq!(vec![pool.clone(), wifi.clone()], property.amenities);

    delete_amenity(tx.ex(), &pool.id).await.unwrap();
    assert_eq!(vec![wifi], get_property(tx.ex(), &property.id).await.unwrap().amenities);

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_properties_create_and_get(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let wifi = create_amenity(tx.ex(), &NewAmenity { name: "Wifi".to_owned() }).await.unwrap();
    let host = create_simple_host(tx.ex(), "host").await;
    let property = NewProperty {
        title: "Cabin".to_owned(),
        description: "Small cabin".to_owned(),
        location: "Woods".to_owned(),
        price_per_night: 80.5,
        bedroom_count: 1,
        bath_room_count: 1,
        max_guest_count: 2,
        rating: 3,
        host_id: host.id.clone(),
        amenity_ids: vec![wifi.id.clone(), wifi.id.clone()],
    };
    let stored = create_property(tx.ex(), &property).await.unwrap();
    assert_eq!(
        Property {
            id: stored.id.clone(),
            title: "Cabin".to_owned(),
            description: "Small cabin".to_owned(),
            location: "Woods".to_owned(),
            price_per_night: 80.5,
            bedroom_count: 1,
            bath_room_count: 1,
            max_guest_count: 2,
            rating: 3,
            host_id: host.id.clone(),
            amenities: vec![wifi],
        },
        stored
    );
    assert_eq!(stored, get_property(tx.ex(), &stored.id).await.unwrap());
    assert_eq!(
        DbError::NotFound,
        get_property(tx.ex(), &PropertyId::new("missing")).await.unwrap_err()
    );

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_properties_create_unknown_host(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let property = NewProperty {
        title: "Cabin".to_owned(),
        description: "Small cabin".to_owned(),
        location: "Woods".to_owned(),
        price_per_night: 80.5,
        bedroom_count: 1,
        bath_room_count: 1,
        max_guest_count: 2,
        rating: 3,
        host_id: HostId::new("missing"),
        amenity_ids: vec![],
    };
    assert_eq!(
        DbError::ForeignKeyViolation,
        create_property(tx.ex(), &property).await.unwrap_err()
    );

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_properties_list_filters(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let wifi = create_amenity(tx.ex(), &NewAmenity { name: "Wifi".to_owned() }).await.unwrap();
    let pool = create_amenity(tx.ex(), &NewAmenity { name: "Pool".to_owned() }).await.unwrap();
    let host = create_simple_host(tx.ex(), "host").await;
    let a = create_simple_property(tx.ex(), &host.id, "A", "New York", 100.0, vec![wifi.id.clone()])
        .await;
    let b = create_simple_property(tx.ex(), &host.id, "B", "york", 150.0, vec![pool.id.clone()])
        .await;
    let c = create_simple_property(tx.ex(), &host.id, "C", "Boston", 100.0, vec![]).await;

    let all = list_properties(tx.ex(), &PropertyFilter::default()).await.unwrap();
    assert_eq!(vec![a.clone(), b.clone(), c.clone()], all);

    let filter = PropertyFilter { location: Some("YORK".to_owned()), ..Default::default() };
    assert_eq!(vec![a.clone(), b.clone()], list_properties(tx.ex(), &filter).await.unwrap());

    let filter = PropertyFilter { price_per_night: Some(100.0), ..Default::default() };
    assert_eq!(vec![a.clone(), c.clone()], list_properties(tx.ex(), &filter).await.unwrap());

    let filter = PropertyFilter { amenities: vec!["Pool".to_owned()], ..Default::default() };
    assert_eq!(vec![b.clone()], list_properties(tx.ex(), &filter).await.unwrap());

    let filter = PropertyFilter {
        amenities: vec!["Pool".to_owned(), "Wifi".to_owned(), "Sauna".to_owned()],
        ..Default::default()
    };
    assert_eq!(vec![a.clone(), b], list_properties(tx.ex(), &filter).await.unwrap());

    let filter = PropertyFilter {
        location: Some("new".to_owned()),
        price_per_night: Some(100.0),
        amenities: vec!["Wifi".to_owned()],
    };
    assert_eq!(vec![a], list_properties(tx.ex(), &filter).await.unwrap());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_properties_update(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let wifi = create_amenity(tx.ex(), &NewAmenity { name: "Wifi".to_owned() }).await.unwrap();
    let pool = create_amenity(tx.ex(), &NewAmenity { name: "Pool".to_owned() }).await.unwrap();
    let host1 = create_simple_host(tx.ex(), "host1").await;
    let host2 = create_simple_host(tx.ex(), "host2").await;
    let property =
        create_simple_property(tx.ex(), &host1.id, "Flat", "Rome", 90.0, vec![wifi.id.clone()])
            .await;

    let update = PropertyUpdate {
        title: Some("Big flat".to_owned()),
        price_per_night: Some(120.0),
        host_id: Some(host2.id.clone()),
        ..Default::default()
    };
    update_property(tx.ex(), &property.id, &update).await.unwrap();
    let updated = get_property(tx.ex(), &property.id).await.unwrap();
    assert_eq!(
        Property {
            title: "Big flat".to_owned(),
            price_per_night: 120.0,
            host_id: host2.id.clone(),
            ..property.clone()
        },
        updated
    );

    set_property_amenities(tx.ex(), &property.id, &[pool.id.clone()]).await.unwrap();
    assert_eq!(vec![pool], get_property_amenities(tx.ex(), &property.id).await.unwrap());
    set_property_amenities(tx.ex(), &property.id, &[]).await.unwrap();
    assert!(get_property_amenities(tx.ex(), &property.id).await.unwrap().is_empty());

    assert_eq!(
        DbError::NotFound,
        update_property(tx.ex(), &PropertyId::new("missing"), &update).await.unwrap_err()
    );

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_properties_delete(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let host = create_simple_host(tx.ex(), "host").await;
    let property1 = create_simple_property(tx.ex(), &host.id, "One", "Oslo", 50.0, vec![]).await;
    let property2 = create_simple_property(tx.ex(), &host.id, "Two", "Oslo", 60.0, vec![]).await;

    delete_property(tx.ex(), &property1.id).await.unwrap();
    assert_eq!(DbError::NotFound, get_property(tx.ex(), &property1.id).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_property(tx.ex(), &property1.id).await.unwrap_err());
    assert_eq!(property2, get_property(tx.ex(), &property2.id).await.unwrap());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_properties_delete_by_host(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let host1 = create_simple_host(tx.ex(), "host1").await;
    let host2 = create_simple_host(tx.ex(), "host2").await;
    create_simple_property(tx.ex(), &host1.id, "One", "Oslo", 50.0, vec![]).await;
    create_simple_property(tx.ex(), &host1.id, "Two", "Oslo", 60.0, vec![]).await;
    let other = create_simple_property(tx.ex(), &host2.id, "Three", "Oslo", 70.0, vec![]).await;

    assert_eq!(2, delete_properties_by_host(tx.ex(), &host1.id).await.unwrap());
    assert_eq!(0, delete_properties_by_host(tx.ex(), &host1.id).await.unwrap());
    delete_host(tx.ex(), &host1.id).await.unwrap();
    assert_eq!(vec![other], list_properties(tx.ex(), &PropertyFilter::default()).await.unwrap());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_hosts_delete_with_properties(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let host = create_simple_host(tx.ex(), "host").await;
    create_simple_property(tx.ex(), &host.id, "One", "Oslo", 50.0, vec![]).await;

    assert_eq!(DbError::ForeignKeyViolation, delete_host(tx.ex(), &host.id).await.unwrap_err());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_bookings_crud(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user = create_simple_user(tx.ex(), "guest").await;
    let host = create_simple_host(tx.ex(), "host").await;
    let property = create_simple_property(tx.ex(), &host.id, "Loft", "Paris", 100.0, vec![]).await;

    let booking = create_simple_booking(tx.ex(), &user.id, &property.id).await;
    assert_eq!(datetime!(2024-06-01 15:00:00.123456 UTC), booking.start_date);
    assert_eq!(booking, get_booking(tx.ex(), &booking.id).await.unwrap());

    let update = BookingUpdate {
        end_date: Some(datetime!(2024-06-05 10:00:00 UTC)),
        number_of_guests: Some(3),
        booking_status: Some("confirmed".to_owned()),
        ..Default::default()
    };
    update_booking(tx.ex(), &booking.id, &update).await.unwrap();
    let updated = get_booking(tx.ex(), &booking.id).await.unwrap();
    assert_eq!(
        Booking {
            end_date: datetime!(2024-06-05 10:00:00 UTC),
            number_of_guests: 3,
            booking_status: Some("confirmed".to_owned()),
            ..booking.clone()
        },
        updated
    );

    update_booking(tx.ex(), &booking.id, &BookingUpdate::default()).await.unwrap();
    assert_eq!(updated, get_booking(tx.ex(), &booking.id).await.unwrap());

    delete_booking(tx.ex(), &booking.id).await.unwrap();
    assert_eq!(DbError::NotFound, get_booking(tx.ex(), &booking.id).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_booking(tx.ex(), &booking.id).await.unwrap_err());
    assert_eq!(
        DbError::NotFound,
        update_booking(tx.ex(), &booking.id, &update).await.unwrap_err()
    );

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_bookings_list_filter(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user1 = create_simple_user(tx.ex(), "guest1").await;
    let user2 = create_simple_user(tx.ex(), "guest2").await;
    let host = create_simple_host(tx.ex(), "host").await;
    let property = create_simple_property(tx.ex(), &host.id, "Loft", "Paris", 100.0, vec![]).await;

    let booking1 = create_simple_booking(tx.ex(), &user1.id, &property.id).await;
    let booking2 = create_simple_booking(tx.ex(), &user2.id, &property.id).await;

    let all = list_bookings(tx.ex(), &BookingFilter::default()).await.unwrap();
    assert_eq!(2, all.len());
    assert!(all.contains(&booking1));
    assert!(all.contains(&booking2));

    let filter = BookingFilter { user_id: Some(user2.id.clone()) };
    assert_eq!(vec![booking2], list_bookings(tx.ex(), &filter).await.unwrap());

    let filter = BookingFilter { user_id: Some(UserId::new("missing")) };
    assert!(list_bookings(tx.ex(), &filter).await.unwrap().is_empty());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_bookings_delete_by_property(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user = create_simple_user(tx.ex(), "guest").await;
    let host = create_simple_host(tx.ex(), "host").await;
    let property1 = create_simple_property(tx.ex(), &host.id, "One", "Rome", 10.0, vec![]).await;
    let property2 = create_simple_property(tx.ex(), &host.id, "Two", "Rome", 20.0, vec![]).await;
    create_simple_booking(tx.ex(), &user.id, &property1.id).await;
    create_simple_booking(tx.ex(), &user.id, &property1.id).await;
    let kept = create_simple_booking(tx.ex(), &user.id, &property2.id).await;

    assert_eq!(2, delete_bookings_by_property(tx.ex(), &property1.id).await.unwrap());
    delete_property(tx.ex(), &property1.id).await.unwrap();
    assert_eq!(vec![kept], list_bookings(tx.ex(), &BookingFilter::default()).await.unwrap());

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_reviews_crud(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user = create_simple_user(tx.ex(), "guest").await;
    let host = create_simple_host(tx.ex(), "host").await;
    let property = create_simple_property(tx.ex(), &host.id, "Loft", "Paris", 100.0, vec![]).await;

    let review = create_simple_review(tx.ex(), &user.id, &property.id).await;
    assert_eq!(review, get_review(tx.ex(), &review.id).await.unwrap());
    assert_eq!(vec![review.clone()], list_reviews(tx.ex()).await.unwrap());

    let update = ReviewUpdate { rating: Some(2), ..Default::default() };
    update_review(tx.ex(), &review.id, &update).await.unwrap();
    assert_eq!(
        Review { rating: 2, ..review.clone() },
        get_review(tx.ex(), &review.id).await.unwrap()
    );

    delete_review(tx.ex(), &review.id).await.unwrap();
    assert_eq!(DbError::NotFound, get_review(tx.ex(), &review.id).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_review(tx.ex(), &review.id).await.unwrap_err());
    assert_eq!(
        DbError::NotFound,
        update_review(tx.ex(), &review.id, &update).await.unwrap_err()
    );

    drop(tx);
    db.close().await;
}

pub(crate) async fn test_reviews_delete_by_user(db: Arc<dyn Db + Send + Sync>) {
    let mut tx = db.begin().await.unwrap();

    let user1 = create_simple_user(tx.ex(), "guest1").await;
    let user2 = create_simple_user(tx.ex(), "guest2").await;
    let host = create_simple_host(tx.ex(), "host").await;
    let property = create_simple_property(tx.ex(), &host.id, "Loft", "Paris", 100.0, vec![]).await;
    create_simple_review(tx.ex(), &user1.id, &property.id).await;
    create_simple_review(tx.ex(), &user1.id, &property.id).await;
    let kept = create_simple_review(tx.ex(), &user2.id, &property.id).await;

    assert_eq!(2, delete_reviews_by_user(tx.ex(), &user1.id).await.unwrap());
    delete_user(tx.ex(), &user1.id).await.unwrap();
    assert_eq!(vec![kept], list_reviews(tx.ex()).await.unwrap());

    drop(tx);
    db.close().await;
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        stayhub_core::db::testutils::generate_tests!(
            $(#[$extra],)?
            $setup,
            $crate::db::tests,
            test_users_upsert_and_get,
            test_users_get_not_found,
            test_users_list_filters,
            test_users_update,
            test_users_delete,
            test_users_delete_with_bookings,
            test_hosts_crud,
            test_hosts_list_filter,
            test_hosts_delete_with_properties,
            test_amenities_crud,
            test_amenities_delete_unlinks_properties,
            test_properties_create_and_get,
            test_properties_create_unknown_host,
            test_properties_list_filters,
            test_properties_update,
            test_properties_delete,
            test_properties_delete_by_host,
            test_bookings_crud,
            test_bookings_list_filter,
            test_bookings_delete_by_property,
            test_reviews_crud,
            test_reviews_delete_by_user
        );
    }
];

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use crate::db::init_schema;

    /// Connects to the test PostgreSQL database and initializes its schema.
    async fn setup() -> Arc<dyn Db + Send + Sync> {
        let db = stayhub_core::db::postgres::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Arc::from(db)
    }

    generate_db_tests!(
        setup().await,
        #[ignore = "Requires environment configuration and is expensive"]
    );
}

mod sqlite {
    use crate::db::testutils::setup;

    generate_db_tests!(setup().await);
}
