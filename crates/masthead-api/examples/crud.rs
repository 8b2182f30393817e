// End-to-end walkthrough of the client API: users, data domains, and
// data products. Needs a real token in MASTHEAD_API_TOKEN.
//
// Run with: cargo run --example crud

use masthead_api::{
    AlertType, AssetType, ClientConfig, DataProduct, DataProductAsset, Domain, MastheadClient,
    User, UserRole,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "masthead_api=debug".into()),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let client = MastheadClient::new(&config)?;

    // ── Users ────────────────────────────────────────────────────────

    let user = client
        .create_user(&User {
            email: "testuser@example.com".into(),
            role: UserRole::User,
        })
        .await?;
    println!("created user {} ({:?})", user.email, user.role);

    for user in client.list_users().await? {
        println!("- {} ({:?})", user.email, user.role);
    }

    let user = client
        .update_user_role(&User {
            email: user.email,
            role: UserRole::Owner,
        })
        .await?;
    println!("promoted {} to {:?}", user.email, user.role);

    client.delete_user(&user.email).await?;
    println!("deleted user {}", user.email);

    // ── Data domains ─────────────────────────────────────────────────

    let mut domain = client
        .create_domain(&Domain {
            name: "API Test Domain".into(),
            email: "domain@example.com".into(),
            slack_channel_name: "data-alerts".into(),
            ..Domain::default()
        })
        .await?;
    println!("created domain {} ({})", domain.name, domain.uuid);

    for domain in client.list_domains().await? {
        println!("- {} ({}) <{}>", domain.name, domain.uuid, domain.email);
    }

    domain.name.push_str(" (Updated)");
    let domain = client.update_domain(&domain).await?;
    println!("renamed domain to {}", domain.name);

    // ── Data products ────────────────────────────────────────────────

    let mut product = client
        .create_data_product(&DataProduct {
            name: "Test Product".into(),
            description: "Data product for API testing".into(),
            data_domain_uuid: domain.uuid.clone(),
            data_assets: vec![DataProductAsset {
                asset_type: AssetType::Dataset,
                uuid: String::new(),
                project: "acme-prod".into(),
                dataset: "billing".into(),
                table: None,
                alert_type: AlertType::Regular,
            }],
            ..DataProduct::default()
        })
        .await?;
    println!("created product {} ({})", product.name, product.uuid);

    // Updates replace the stored asset list wholesale.
    product.data_assets.push(DataProductAsset {
        asset_type: AssetType::Table,
        uuid: String::new(),
        project: "acme-prod".into(),
        dataset: "billing".into(),
        table: Some("invoices".into()),
        alert_type: AlertType::Critical,
    });
    let product = client.update_data_product(&product).await?;
    println!(
        "product {} now tracks {} assets",
        product.name,
        product.data_assets.len()
    );

    client.delete_data_product(&product.uuid).await?;
    client.delete_domain(&domain.uuid).await?;
    println!("cleaned up");

    Ok(())
}
