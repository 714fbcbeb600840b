//! Integration tests for image providers using wiremock.
//!
//! These tests mock upstream HTTP responses to verify request shape and
//! response mapping without hitting real APIs.

use std::sync::Arc;

use lumina_search::providers::{self, Adapter};
use lumina_search::{Config, ImageQuery, OrderBy, Provider, Registry, Search};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(id: &str, config: &Config, server: &MockServer) -> Adapter {
    Adapter::new(providers::find(id).unwrap(), config)
        .unwrap()
        .with_base_url(server.uri())
}

mod pexels_tests {
    use super::*;

    /// Test successful search parsing with a valid Pexels response.
    #[tokio::test]
    async fn test_pexels_search_parses_valid_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "ocean"))
            .and(query_param("per_page", "2"))
            .and(header("Authorization", "pexels-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photos": [
                    {
                        "id": 101,
                        "url": "https://www.pexels.com/photo/101/",
                        "photographer": "Ana Lima",
                        "photographer_url": "https://www.pexels.com/@ana",
                        "alt": "Waves at dusk",
                        "src": {
                            "original": "https://images.pexels.com/101/original.jpg",
                            "medium": "https://images.pexels.com/101/medium.jpg",
                            "tiny": "https://images.pexels.com/101/tiny.jpg"
                        }
                    },
                    {
                        "id": 102,
                        "url": "https://www.pexels.com/photo/102/",
                        "src": {
                            "medium": "https://images.pexels.com/102/medium.jpg"
                        }
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new().with_secret("PEXELS_API_KEY", "pexels-key");
        let provider = adapter("pexels", &config, &server);
        let images = provider
            .fetch(&ImageQuery::new("ocean").with_per_page(2))
            .await
            .unwrap();

        assert_eq!(images.len(), 2);

        let first = &images[0];
        assert_eq!(first.image_id, "101");
        assert_eq!(first.source, "pexels");
        assert_eq!(first.title, "Photo by Ana Lima");
        assert_eq!(first.description.as_deref(), Some("Waves at dusk"));
        assert_eq!(first.thumbnail_url, "https://images.pexels.com/101/tiny.jpg");
        assert_eq!(first.regular_url, "https://images.pexels.com/101/medium.jpg");
        assert_eq!(first.photographer.as_deref(), Some("Ana Lima"));
        assert_eq!(first.license, "free");

        let second = &images[1];
        assert_eq!(second.title, "Image from Pexels");
        assert_eq!(second.photographer, None);
        assert_eq!(second.download_url, "");
    }

    /// Test that an HTTP error is reported by fetch and absorbed by search.
    #[tokio::test]
    async fn test_pexels_handles_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = Config::new().with_secret("PEXELS_API_KEY", "k");
        let provider = adapter("pexels", &config, &server);
        let query = ImageQuery::new("ocean");

        assert!(provider.fetch(&query).await.is_err());
        assert!(provider.search(&query).await.is_empty());
    }

    /// Test error handling for malformed JSON responses.
    #[tokio::test]
    async fn test_pexels_handles_malformed_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&server)
            .await;

        let config = Config::new().with_secret("PEXELS_API_KEY", "k");
        let provider = adapter("pexels", &config, &server);
        let query = ImageQuery::new("ocean");

        assert!(provider.fetch(&query).await.is_err());
        assert!(provider.search(&query).await.is_empty());
    }

    /// Test that a response without the result array yields nothing.
    #[tokio::test]
    async fn test_pexels_missing_results_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "page": 1 })))
            .mount(&server)
            .await;

        let config = Config::new().with_secret("PEXELS_API_KEY", "k");
        let provider = adapter("pexels", &config, &server);
        let images = provider.fetch(&ImageQuery::new("ocean")).await.unwrap();
        assert!(images.is_empty());
    }

    /// Test that a provider without credentials never sends a request.
    #[tokio::test]
    async fn test_pexels_without_credentials_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = adapter("pexels", &Config::new(), &server);
        assert!(!provider.is_available());
        assert!(provider.search(&ImageQuery::new("ocean")).await.is_empty());
    }
}

mod unsplash_tests {
    use super::*;

    /// Test that per_page is clamped to the provider maximum and the order
    /// hint is forwarded.
    #[tokio::test]
    async fn test_unsplash_clamps_per_page_and_orders() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/photos"))
            .and(query_param("query", "forest"))
            .and(query_param("per_page", "20"))
            .and(query_param("page", "2"))
            .and(query_param("order_by", "latest"))
            .and(header("Authorization", "Client-ID unsplash-key"))
            .and(header("Accept-Version", "v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "results": [
                    {
                        "id": "abc",
                        "description": null,
                        "alt_description": "green forest",
                        "urls": {
                            "raw": "https://images.unsplash.com/abc?raw",
                            "regular": "https://images.unsplash.com/abc?regular",
                            "thumb": "https://images.unsplash.com/abc?thumb"
                        },
                        "links": {
                            "html": "https://unsplash.com/photos/abc",
                            "download_location": "https://api.unsplash.com/photos/abc/download"
                        },
                        "user": {
                            "name": "Rui",
                            "links": { "html": "https://unsplash.com/@rui" }
                        }
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new().with_secret("UNSPLASH_API_KEY", "unsplash-key");
        let provider = adapter("unsplash", &config, &server);
        let query = ImageQuery::new("forest")
            .with_page(2)
            .with_per_page(50)
            .with_order(OrderBy::Latest);
        let images = provider.fetch(&query).await.unwrap();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].title, "green forest");
        assert_eq!(images[0].source_url, "https://unsplash.com/photos/abc");
        assert_eq!(
            images[0].photographer_url.as_deref(),
            Some("https://unsplash.com/@rui")
        );
    }
}

mod pixabay_tests {
    use super::*;

    fn hit(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "pageURL": format!("https://pixabay.com/photos/{}/", id),
            "tags": "sea, beach",
            "previewURL": format!("https://cdn.pixabay.com/{}_150.jpg", id),
            "webformatURL": format!("https://cdn.pixabay.com/{}_640.jpg", id),
            "largeImageURL": format!("https://cdn.pixabay.com/{}_1280.jpg", id),
            "user": "maria",
            "user_id": 7
        })
    }

    /// Test that the page-size floor is applied upstream and the result is
    /// cut back to what was asked for.
    #[tokio::test]
    async fn test_pixabay_raises_small_page_and_truncates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("q", "beach"))
            .and(query_param("per_page", "3"))
            .and(query_param("key", "pixabay-key"))
            .and(query_param("image_type", "photo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [hit(1), hit(2), hit(3)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new().with_secret("PIXABAY_API_KEY", "pixabay-key");
        let provider = adapter("pixabay", &config, &server);
        let images = provider
            .fetch(&ImageQuery::new("beach").with_per_page(1))
            .await
            .unwrap();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].image_id, "1");
        assert_eq!(images[0].title, "Photo by maria");
        assert_eq!(
            images[0].photographer_url.as_deref(),
            Some("https://pixabay.com/users/maria-7/")
        );
    }
}

mod creative_commons_tests {
    use super::*;

    /// Test license normalization and upstream source tagging.
    #[tokio::test]
    async fn test_creative_commons_license_and_source() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/images/"))
            .and(query_param("q", "parrot"))
            .and(query_param("page_size", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result_count": 2,
                "results": [
                    {
                        "id": "cc-1",
                        "title": "Blue parrot",
                        "url": "https://live.staticflickr.com/1.jpg",
                        "thumbnail": "https://api.openverse.org/v1/images/cc-1/thumb/",
                        "creator": "Joao",
                        "foreign_landing_url": "https://www.flickr.com/photos/1",
                        "license": "by-nc-sa",
                        "source": "flickr"
                    },
                    {
                        "id": "cc-2",
                        "url": "https://upload.wikimedia.org/2.jpg",
                        "license": "cc0"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let provider = adapter("creative_commons", &Config::new(), &server);
        assert!(provider.is_available());

        let images = provider
            .fetch(&ImageQuery::new("parrot").with_per_page(2))
            .await
            .unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].license, "CC BY-NC-SA");
        assert_eq!(images[0].source, "cc_flickr");
        assert_eq!(images[1].license, "CC0 (Public Domain)");
        assert_eq!(images[1].source, "cc_commons");
        assert_eq!(images[1].title, "Image from Creative Commons");
        assert_eq!(images[1].thumbnail_url, "https://upload.wikimedia.org/2.jpg");
    }
}

mod shutterstock_tests {
    use super::*;

    fn credentials() -> Config {
        Config::new()
            .with_secret("SHUTTERSTOCK_CLIENT_ID", "client")
            .with_secret("SHUTTERSTOCK_CLIENT_SECRET", "secret")
    }

    /// Test that the access token is exchanged once and reused.
    #[tokio::test]
    async fn test_shutterstock_token_is_cached() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/access_token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-1",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/images/search"))
            .and(header("Authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "987",
                        "description": "Sunset over the Amazon",
                        "assets": {
                            "preview": { "url": "https://image.shutterstock.com/987-preview.jpg" },
                            "large_thumb": { "url": "https://image.shutterstock.com/987-thumb.jpg" }
                        },
                        "contributor": { "name": "Studio" }
                    }
                ]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let provider = adapter("shutterstock", &credentials(), &server);
        let query = ImageQuery::new("amazon");

        let first = provider.fetch(&query).await.unwrap();
        let second = provider.fetch(&query).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].title, "Sunset over the Amazon");
        assert_eq!(first[0].license, "paid");
        assert_eq!(
            first[0].source_url,
            "https://www.shutterstock.com/image-photo/987"
        );
    }

    /// Test that a rejected token exchange yields no images.
    #[tokio::test]
    async fn test_shutterstock_token_failure_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/access_token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/images/search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = adapter("shutterstock", &credentials(), &server);
        assert!(provider.search(&ImageQuery::new("amazon")).await.is_empty());
    }
}

mod search_tests {
    use super::*;

    /// Test that one failing provider does not affect the others.
    #[tokio::test]
    async fn test_search_isolates_failing_provider() {
        let good = MockServer::start().await;
        let bad = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "photos": [
                    { "id": 1, "src": { "medium": "https://images.pexels.com/1.jpg" } }
                ]
            })))
            .mount(&good)
            .await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&bad)
            .await;

        let config = Config::new()
            .with_secret("PEXELS_API_KEY", "k")
            .with_secret("PIXABAY_API_KEY", "k");
        let registry = Registry::with_providers(vec![
            Arc::new(adapter("pexels", &config, &good)) as Arc<dyn Provider>,
            Arc::new(adapter("pixabay", &config, &bad)) as Arc<dyn Provider>,
        ]);
        let search = Search::new(Arc::new(registry));

        let response = search
            .search(ImageQuery::new("x").with_sources(["pixabay", "pexels"]))
            .await
            .unwrap();

        assert_eq!(response.total_results, 1);
        assert_eq!(response.images[0].source, "pexels");
    }
}

mod credentials_tests {
    use super::*;

    /// Test that no provider needing credentials sends a request without them.
    #[tokio::test]
    async fn test_catalog_without_credentials_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = Config::new();
        let query = ImageQuery::new("ocean");
        let mut checked = 0;

        for spec in providers::CATALOG {
            if spec.required_secrets().is_empty() {
                continue;
            }
            let provider = adapter(spec.id, &config, &server);
            assert!(!provider.is_available(), "{}", spec.id);
            assert!(provider.search(&query).await.is_empty(), "{}", spec.id);
            checked += 1;
        }

        assert_eq!(checked, providers::CATALOG.len() - 1);
    }
}

mod google_tests {
    use super::*;

    /// Test offset paging, query-string credentials and id fallback.
    #[tokio::test]
    async fn test_google_offset_and_id_fallback() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", "rio"))
            .and(query_param("start", "6"))
            .and(query_param("num", "5"))
            .and(query_param("key", "g-key"))
            .and(query_param("cx", "g-cx"))
            .and(query_param("searchType", "image"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "title": "Sugarloaf",
                        "link": "https://example.org/img/sugarloaf.jpg",
                        "snippet": "Sugarloaf mountain",
                        "cacheId": "c-1",
                        "image": {
                            "thumbnailLink": "https://encrypted-tbn0.gstatic.com/1",
                            "contextLink": "https://example.org/sugarloaf"
                        }
                    },
                    {
                        "link": "https://example.org/img/copacabana.jpg"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new()
            .with_secret("GOOGLE_API_KEY", "g-key")
            .with_secret("GOOGLE_SEARCH_ENGINE_ID", "g-cx");
        let provider = adapter("google", &config, &server);
        let images = provider
            .fetch(&ImageQuery::new("rio").with_page(2).with_per_page(5))
            .await
            .unwrap();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].image_id, "c-1");
        assert_eq!(images[0].title, "Sugarloaf");
        assert_eq!(images[0].description.as_deref(), Some("Sugarloaf mountain"));
        assert_eq!(images[0].thumbnail_url, "https://encrypted-tbn0.gstatic.com/1");
        assert_eq!(images[0].source_url, "https://example.org/sugarloaf");
        assert_eq!(images[0].license, "various");

        assert_eq!(images[1].image_id, "copacabana.jpg");
        assert_eq!(images[1].title, "Image from Google Custom Search");
        assert_eq!(images[1].regular_url, "https://example.org/img/copacabana.jpg");
    }
}

mod freepik_tests {
    use super::*;

    /// Test that the license follows the premium flag.
    #[tokio::test]
    async fn test_freepik_premium_license() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/resources"))
            .and(query_param("term", "toucan"))
            .and(query_param("limit", "3"))
            .and(query_param("order", "relevance"))
            .and(header("x-freepik-api-key", "fp-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": 11,
                        "title": "Toucan on a branch",
                        "url": "https://www.freepik.com/photo/11",
                        "image": {
                            "url": "https://img.freepik.com/11.jpg",
                            "source": { "url": "https://img.freepik.com/11-full.jpg" }
                        },
                        "thumbnail": { "url": "https://img.freepik.com/11-thumb.jpg" },
                        "author": { "name": "Bia", "url": "https://www.freepik.com/author/bia" },
                        "premium": true
                    },
                    { "id": 12, "premium": false },
                    { "id": 13 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new().with_secret("FREEPIK_API_KEY", "fp-key");
        let provider = adapter("freepik", &config, &server);
        let images = provider
            .fetch(&ImageQuery::new("toucan").with_per_page(3))
            .await
            .unwrap();

        let licenses: Vec<&str> = images.iter().map(|i| i.license.as_str()).collect();
        assert_eq!(licenses, vec!["paid", "free", "free"]);
        assert_eq!(images[0].title, "Toucan on a branch");
        assert_eq!(images[0].thumbnail_url, "https://img.freepik.com/11-thumb.jpg");
        assert_eq!(images[0].regular_url, "https://img.freepik.com/11.jpg");
        assert_eq!(images[0].raw_url.as_deref(), Some("https://img.freepik.com/11-full.jpg"));
        assert_eq!(images[0].photographer.as_deref(), Some("Bia"));
        assert_eq!(images[1].title, "Image from Freepik");
    }
}

mod getty_tests {
    use super::*;

    fn getty_body() -> serde_json::Value {
        json!({
            "result_count": 1,
            "images": [
                {
                    "id": "1234",
                    "title": "Iguazu Falls",
                    "caption": "Aerial view",
                    "display_sizes": [
                        { "name": "thumb", "uri": "https://media.gettyimages.com/1234-thumb.jpg" }
                    ]
                }
            ]
        })
    }

    /// Test the Getty response shape and the oldest-first order hint.
    #[tokio::test]
    async fn test_getty_images_display_sizes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/images"))
            .and(query_param("phrase", "iguazu"))
            .and(query_param("page_size", "20"))
            .and(query_param("sort_order", "oldest"))
            .and(header("Api-Key", "getty-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(getty_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new().with_secret("GETTY_IMAGES_API_KEY", "getty-key");
        let provider = adapter("getty_images", &config, &server);
        let images = provider
            .fetch(&ImageQuery::new("iguazu").with_order(OrderBy::Oldest))
            .await
            .unwrap();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].image_id, "1234");
        assert_eq!(images[0].description.as_deref(), Some("Aerial view"));
        assert_eq!(images[0].thumbnail_url, "https://media.gettyimages.com/1234-thumb.jpg");
        assert_eq!(images[0].regular_url, "https://media.gettyimages.com/1234-thumb.jpg");
        assert_eq!(images[0].source_url, "https://www.gettyimages.com/detail/1234");
        assert_eq!(images[0].license, "paid");
    }

    /// Test that iStock shares the Getty shape but restricts product types.
    #[tokio::test]
    async fn test_istock_product_types() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/images"))
            .and(query_param("product_types", "easyaccess,editorialsubscription"))
            .and(header("Api-Key", "istock-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(getty_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = Config::new().with_secret("ISTOCK_API_KEY", "istock-key");
        let provider = adapter("istock", &config, &server);
        let images = provider.fetch(&ImageQuery::new("iguazu")).await.unwrap();

        assert_eq!(images[0].source, "istock");
        assert_eq!(images[0].source_url, "https://www.istockphoto.com/photo/1234");
    }
}

mod bearer_catalog_tests {
    use super::*;

    struct Case {
        id: &'static str,
        secret: &'static str,
        path: &'static str,
        query: &'static str,
        size: &'static str,
        item: serde_json::Value,
        results: &'static str,
        title: &'static str,
        photographer: Option<&'static str>,
        source_url: &'static str,
        license: &'static str,
    }

    fn cases() -> Vec<Case> {
        vec![
            Case {
                id: "agencia_brasil",
                secret: "AGENCIA_BRASIL_API_KEY",
                path: "/api/fotos",
                query: "q",
                size: "per_page",
                item: json!({
                    "id": 1, "titulo": "Esplanada", "fotografo": "Marcelo",
                    "url_media": "https://agenciabrasil.ebc.com.br/m/1.jpg"
                }),
                results: "fotos",
                title: "Esplanada",
                photographer: Some("Marcelo"),
                source_url: "https://agenciabrasil.ebc.com.br",
                license: "public",
            },
            Case {
                id: "ibge",
                secret: "IBGE_API_KEY",
                path: "/api/fotos",
                query: "cidade",
                size: "quantidade",
                item: json!({
                    "id": 2, "titulo": "Ouro Preto",
                    "url": "https://cidades.ibge.gov.br/fotos/2"
                }),
                results: "fotos",
                title: "Ouro Preto",
                photographer: Some("IBGE"),
                source_url: "https://cidades.ibge.gov.br/fotos/2",
                license: "public",
            },
            Case {
                id: "inpe",
                secret: "INPE_API_KEY",
                path: "/api/images",
                query: "search",
                size: "limit",
                item: json!({ "id": "CBERS4-3", "title": "Pantanal scene" }),
                results: "results",
                title: "Pantanal scene",
                photographer: Some("INPE"),
                source_url: "https://www.dgi.inpe.br/catalogo",
                license: "public",
            },
            Case {
                id: "pulsar_imagens",
                secret: "PULSAR_IMAGENS_API_KEY",
                path: "/api/search",
                query: "q",
                size: "per_page",
                item: json!({
                    "id": 4, "title": "Jangada", "photographer": "Rita",
                    "image_url": "https://www.pulsarimagens.com.br/4"
                }),
                results: "results",
                title: "Jangada",
                photographer: Some("Rita"),
                source_url: "https://www.pulsarimagens.com.br/4",
                license: "paid",
            },
            Case {
                id: "fotoarena",
                secret: "FOTOARENA_API_KEY",
                path: "/api/search",
                query: "q",
                size: "per_page",
                item: json!({ "id": 5, "photographer": "Leo" }),
                results: "results",
                title: "Image from Foto Arena",
                photographer: Some("Leo"),
                source_url: "https://www.fotoarena.com.br",
                license: "paid",
            },
            Case {
                id: "usp_imagens",
                secret: "USP_IMAGENS_API_KEY",
                path: "/api/buscar",
                query: "busca",
                size: "quantidade",
                item: json!({ "id": 6, "titulo": "Museu Paulista", "fotografo": "Ana" }),
                results: "imagens",
                title: "Museu Paulista",
                photographer: Some("Ana"),
                source_url: "https://imagens.usp.br",
                license: "academic",
            },
            Case {
                id: "tyba",
                secret: "TYBA_API_KEY",
                path: "/api/search",
                query: "query",
                size: "limit",
                item: json!({ "id": 7, "title": "Lençóis", "author": "Rogerio" }),
                results: "images",
                title: "Lençóis",
                photographer: Some("Rogerio"),
                source_url: "https://tyba.com.br",
                license: "paid",
            },
            Case {
                id: "natureza_brasileira",
                secret: "NATUREZA_BRASILEIRA_API_KEY",
                path: "/api/search",
                query: "busca",
                size: "itens",
                item: json!({
                    "id": 8, "titulo": "Arara-azul",
                    "link": "https://www.naturezabrasileira.com.br/8"
                }),
                results: "fotos",
                title: "Arara-azul",
                photographer: None,
                source_url: "https://www.naturezabrasileira.com.br/8",
                license: "paid",
            },
            Case {
                id: "fabio_colombini",
                secret: "FABIO_COLOMBINI_API_KEY",
                path: "/api/search",
                query: "q",
                size: "per_page",
                item: json!({ "id": 9, "title": "Onça-pintada" }),
                results: "photos",
                title: "Onça-pintada",
                photographer: Some("Fabio Colombini"),
                source_url: "https://www.fabiocolombini.com.br",
                license: "paid",
            },
        ]
    }

    /// Test request shape and field mapping for every bearer-token catalog.
    #[tokio::test]
    async fn test_bearer_catalogs_map_responses() {
        for case in cases() {
            let server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path(case.path))
                .and(query_param(case.query, "brasil"))
                .and(query_param(case.size, "4"))
                .and(header("Authorization", "Bearer token-1"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({ (case.results): [case.item.clone()] })),
                )
                .expect(1)
                .mount(&server)
                .await;

            let config = Config::new().with_secret(case.secret, "token-1");
            let provider = adapter(case.id, &config, &server);
            let images = provider
                .fetch(&ImageQuery::new("brasil").with_per_page(4))
                .await
                .unwrap_or_else(|e| panic!("{}: {}", case.id, e));

            assert_eq!(images.len(), 1, "{}", case.id);
            let image = &images[0];
            assert_eq!(image.source, case.id);
            assert_eq!(image.title, case.title, "{}", case.id);
            assert_eq!(image.photographer.as_deref(), case.photographer, "{}", case.id);
            assert_eq!(image.source_url, case.source_url, "{}", case.id);
            assert_eq!(image.license, case.license, "{}", case.id);
            assert!(!image.image_id.is_empty(), "{}", case.id);
        }
    }
}
