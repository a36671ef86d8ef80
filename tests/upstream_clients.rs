//! Exercises the GitHub and announcement clients against a local fake upstream.

mod common;

use std::time::Duration;

use ghdisk::domain::entity::{Announcement, RepositoryRef};
use ghdisk::domain::error::{AnnouncementError, ListingError};
use ghdisk::domain::prelude::{AnnouncementSource, Netdisk, ReleaseSource};

async fn github() -> ghdisk::adapter_github::Client {
    let address = common::start_upstream().await;
    ghdisk::adapter_github::Config::new(format!("http://{address}"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn should_map_releases_with_their_assets() {
    let client = github().await;
    let releases = client
        .list_releases(&RepositoryRef::new("octo", "disk"))
        .await
        .unwrap();

    assert_eq!(releases.len(), 3);
    assert_eq!(releases[0].tag, "v1.0");
    assert_eq!(releases[0].assets.len(), 3);
    assert_eq!(releases[0].assets[0].release_name, "First");
    assert_eq!(
        releases[0].assets[0].download_url,
        "https://github.com/octo/disk/releases/download/v1.0/a.zip"
    );
    assert_eq!(releases[0].assets[0].size, 1536);
    // unnamed releases fall back to their tag
    assert_eq!(releases[1].assets[0].release_name, "v2.0");
    assert_eq!(releases[1].assets[0].release_tag, "v2.0");
    assert!(releases[2].assets.is_empty());
}

#[tokio::test]
async fn should_aggregate_newest_first() {
    let address = common::start_upstream().await;
    let github = ghdisk::adapter_github::Config::new(format!("http://{address}"))
        .build()
        .unwrap();
    let announcement = ghdisk::adapter_announcement::Config::default()
        .build()
        .unwrap();
    let netdisk = ghdisk::domain::NetdiskService::new(github, announcement);

    let assets = netdisk
        .aggregate(&RepositoryRef::new("octo", "disk"))
        .await
        .unwrap();
    let names: Vec<_> = assets.iter().map(|asset| asset.name.as_str()).collect();
    assert_eq!(names, ["d.exe", "b.txt", "c.pdf", "e.md", "a.zip"]);

    let empty = netdisk
        .aggregate(&RepositoryRef::new("octo", "empty"))
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn should_map_upstream_failures() {
    let client = github().await;
    let cases = [
        ("missing", ListingError::NotFound),
        ("limited", ListingError::RateLimited),
        ("broken", ListingError::network(Some(500), "status 500")),
    ];
    for (name, expected) in cases {
        let err = client
            .list_releases(&RepositoryRef::new("octo", name))
            .await
            .unwrap_err();
        assert_eq!(err, expected, "repository {name}");
    }
}

#[tokio::test]
async fn should_reject_non_list_body() {
    let client = github().await;
    let err = client
        .list_releases(&RepositoryRef::new("octo", "weird"))
        .await
        .unwrap_err();
    assert!(matches!(err, ListingError::Malformed(_)), "{err:?}");
}

#[tokio::test]
async fn should_send_token_and_page_size() {
    let address = common::start_upstream().await;
    let base_url = format!("http://{address}");
    let repo = RepositoryRef::new("octo", "private");

    let anonymous = ghdisk::adapter_github::Config::new(base_url.clone())
        .build()
        .unwrap();
    let err = anonymous.list_releases(&repo).await.unwrap_err();
    assert_eq!(err, ListingError::network(Some(401), "status 401"));

    let authenticated = ghdisk::adapter_github::Config::new(base_url)
        .with_token(common::TOKEN)
        .build()
        .unwrap();
    let releases = authenticated.list_releases(&repo).await.unwrap();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].tag, "v1");
    // the fake upstream echoes the requested page size in the release name
    assert_eq!(releases[0].assets[0].release_name, "per page 30");
}

#[tokio::test]
async fn should_clamp_requested_page_size() {
    let address = common::start_upstream().await;
    let repo = RepositoryRef::new("octo", "private");

    let client = ghdisk::adapter_github::Config::new(format!("http://{address}"))
        .with_token(common::TOKEN)
        .with_per_page(500)
        .build()
        .unwrap();
    let releases = client.list_releases(&repo).await.unwrap();
    assert_eq!(releases[0].assets[0].release_name, "per page 100");

    let client = ghdisk::adapter_github::Config::new(format!("http://{address}"))
        .with_token(common::TOKEN)
        .with_per_page(0)
        .build()
        .unwrap();
    let releases = client.list_releases(&repo).await.unwrap();
    assert_eq!(releases[0].assets[0].release_name, "per page 1");
}

#[tokio::test]
async fn should_report_unreachable_upstream() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = ghdisk::adapter_github::Config::new(format!("http://{address}"))
        .build()
        .unwrap();
    let err = client
        .list_releases(&RepositoryRef::new("octo", "disk"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ListingError::Network { status: None, .. }),
        "{err:?}"
    );
}

#[tokio::test]
async fn should_fetch_announcements_by_kind() {
    let address = common::start_upstream().await;
    let client = ghdisk::adapter_announcement::Config::default()
        .with_allowed_hosts(["127.0.0.1"])
        .build()
        .unwrap();

    let text = client
        .fetch_announcement(&format!("http://{address}/notice.txt"))
        .await
        .unwrap();
    assert_eq!(
        text,
        Announcement::Text("maintenance tonight\nsee https://status.example.com".into())
    );

    let html = client
        .fetch_announcement(&format!("http://{address}/notice"))
        .await
        .unwrap();
    assert_eq!(html, Announcement::Html("<strong>welcome</strong>".into()));

    let err = client
        .fetch_announcement(&format!("http://{address}/gone"))
        .await
        .unwrap_err();
    assert_eq!(err, AnnouncementError::Status(404));
}

#[tokio::test]
async fn should_refuse_local_announcements_by_default() {
    let address = common::start_upstream().await;
    let client = ghdisk::adapter_announcement::Config::default()
        .build()
        .unwrap();
    let err = client
        .fetch_announcement(&format!("http://{address}/notice.txt"))
        .await
        .unwrap_err();
    assert_eq!(err, AnnouncementError::Forbidden("127.0.0.1".into()));

    let err = client
        .fetch_announcement("http://localhost/notice.txt")
        .await
        .unwrap_err();
    assert_eq!(err, AnnouncementError::Forbidden("localhost".into()));
}

#[tokio::test]
async fn should_refuse_hosts_outside_allow_list() {
    let client = ghdisk::adapter_announcement::Config::default()
        .with_allowed_hosts(["status.example.com"])
        .build()
        .unwrap();
    let err = client
        .fetch_announcement("https://example.org/notice.txt")
        .await
        .unwrap_err();
    assert_eq!(err, AnnouncementError::Forbidden("example.org".into()));
}

#[tokio::test]
async fn should_not_wait_for_silent_announcement_host() {
    let upstream = common::start_upstream().await;
    let silent = common::start_silent_host().await;
    let github = ghdisk::adapter_github::Config::new(format!("http://{upstream}"))
        .build()
        .unwrap();
    let announcement = ghdisk::adapter_announcement::Config::default()
        .with_timeout(Duration::from_millis(200))
        .with_allowed_hosts(["127.0.0.1"])
        .build()
        .unwrap();
    let netdisk = ghdisk::domain::NetdiskService::new(github, announcement);

    let mut settings = ghdisk::domain::settings::Settings::new(RepositoryRef::new("octo", "disk"));
    settings.announcement = Some(format!("http://{silent}/notice.txt"));
    let browse = tokio::time::timeout(Duration::from_secs(5), netdisk.browse(&settings))
        .await
        .expect("browse should not hang on the announcement host");

    assert_eq!(browse.listing.unwrap().len(), 5);
    let err = browse.announcement.unwrap().unwrap_err();
    assert!(matches!(err, AnnouncementError::Transport(_)), "{err:?}");
}
