use std::collections::BTreeSet;

use super::manifest::{
    BACKEND_SERVICE, BuildContext, ComposeManifest, Network, PortMapping, Service,
    VolumeMount, WEBSERVER_SERVICE,
};
use super::proxy::{ProxyConfig, ServerBlock};
use super::recipe::{ImageRecipe, IniEntry, RuntimeConfig};
use crate::domain::artifacts::{
    IMAGE_BUILD_DIR, PROXY_CONFIG_DIR, PROXY_CONFIG_MOUNT, RUNTIME_CONFIG_FILE,
    RUNTIME_CONFIG_MOUNT,
};
use crate::domain::descriptor::{ApplicationDescriptor, ResolvedApplication, validate};
use crate::domain::error::ValidationError;
use crate::domain::stack::StackSettings;

const INDEX_FILES: [&str; 2] = ["index.php", "index.html"];
const NGINX_LOG_DIR: &str = "/var/log/nginx";
const FPM_COMMAND: &str = "php-fpm";

/// Everything one generation run derives from its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub apps: Vec<ResolvedApplication>,
    pub proxy: ProxyConfig,
    pub manifest: ComposeManifest,
    pub recipe: ImageRecipe,
    pub runtime: RuntimeConfig,
}

impl Composition {
    pub fn build(
        descriptors: &[ApplicationDescriptor],
        settings: &StackSettings,
    ) -> Result<Self, ValidationError> {
        let apps = resolve_all(descriptors, settings)?;
        Ok(Self {
            proxy: proxy_config(&apps, settings),
            manifest: compose_manifest(&apps, settings),
            recipe: build_recipe(descriptors, settings),
            runtime: runtime_config(settings),
            apps,
        })
    }
}

/// Merge descriptors into one proxy config and one two-service manifest.
///
/// Re-validates its input and fails exactly like [`validate`].
pub fn compose(
    descriptors: &[ApplicationDescriptor],
    settings: &StackSettings,
) -> Result<(ProxyConfig, ComposeManifest), ValidationError> {
    let apps = resolve_all(descriptors, settings)?;
    Ok((proxy_config(&apps, settings), compose_manifest(&apps, settings)))
}

/// Build the PHP-FPM image recipe for a descriptor set.
pub fn image_recipe(
    descriptors: &[ApplicationDescriptor],
    settings: &StackSettings,
) -> Result<ImageRecipe, ValidationError> {
    resolve_all(descriptors, settings)?;
    Ok(build_recipe(descriptors, settings))
}

/// Build the `php.ini` overrides: size limits first, then extra keys in key order.
pub fn runtime_config(settings: &StackSettings) -> RuntimeConfig {
    let mut entries = vec![
        IniEntry { key: "upload_max_filesize".into(), value: settings.upload_max_filesize.clone() },
        IniEntry { key: "post_max_size".into(), value: settings.post_max_size.clone() },
    ];
    for (key, value) in &settings.ini {
        if key == "upload_max_filesize" || key == "post_max_size" {
            continue;
        }
        entries.push(IniEntry { key: key.clone(), value: value.clone() });
    }
    RuntimeConfig { entries }
}

fn resolve_all(
    descriptors: &[ApplicationDescriptor],
    settings: &StackSettings,
) -> Result<Vec<ResolvedApplication>, ValidationError> {
    validate(descriptors)?;
    settings.validate()?;
    descriptors.iter().map(|descriptor| descriptor.resolve(&settings.web_root)).collect()
}

fn proxy_config(apps: &[ResolvedApplication], settings: &StackSettings) -> ProxyConfig {
    let upstream = format!("{}:{}", BACKEND_SERVICE, settings.upstream_port);
    let server_blocks = apps
        .iter()
        .map(|app| ServerBlock {
            app: app.name.clone(),
            listen: app.listen_port,
            root: app.served_path.clone(),
            index: INDEX_FILES.iter().map(|file| file.to_string()).collect(),
            error_log: format!("{}/{}_error.log", NGINX_LOG_DIR, app.name),
            access_log: format!("{}/{}_access.log", NGINX_LOG_DIR, app.name),
            upstream: upstream.clone(),
        })
        .collect();
    ProxyConfig { server_blocks }
}

fn compose_manifest(apps: &[ResolvedApplication], settings: &StackSettings) -> ComposeManifest {
    let mut ports = Vec::new();
    let mut app_volumes = Vec::new();
    for app in apps {
        push_unique(&mut ports, PortMapping::same(app.listen_port));
        push_unique(&mut app_volumes, VolumeMount::bind(&app.host_path, &app.mount_path));
    }

    let mut webserver_volumes = app_volumes.clone();
    webserver_volumes
        .push(VolumeMount::read_only(format!("./{}", PROXY_CONFIG_DIR), PROXY_CONFIG_MOUNT));

    let mut backend_volumes = app_volumes;
    backend_volumes
        .push(VolumeMount::read_only(format!("./{}", RUNTIME_CONFIG_FILE), RUNTIME_CONFIG_MOUNT));

    let network =
        Network { name: settings.network.clone(), driver: settings.network_driver.clone() };
    let networks = vec![network.name.clone()];

    ComposeManifest {
        network,
        webserver: Service {
            name: WEBSERVER_SERVICE.into(),
            image: Some(settings.proxy_image.clone()),
            build: None,
            container_name: WEBSERVER_SERVICE.into(),
            restart: settings.restart.clone(),
            ports,
            volumes: webserver_volumes,
            networks: networks.clone(),
        },
        backend: Service {
            name: BACKEND_SERVICE.into(),
            image: None,
            build: Some(BuildContext {
                context: format!("./{}", IMAGE_BUILD_DIR),
                dockerfile: "Dockerfile".into(),
            }),
            container_name: BACKEND_SERVICE.into(),
            restart: settings.restart.clone(),
            ports: Vec::new(),
            volumes: backend_volumes,
            networks,
        },
    }
}

fn build_recipe(descriptors: &[ApplicationDescriptor], settings: &StackSettings) -> ImageRecipe {
    let extensions: BTreeSet<String> = settings
        .extensions
        .iter()
        .chain(descriptors.iter().flat_map(|descriptor| descriptor.php_extensions.iter()))
        .cloned()
        .collect();

    ImageRecipe {
        base_image: settings.php_image.clone(),
        system_packages: settings.system_packages.clone(),
        extensions: extensions.into_iter().collect(),
        user: settings.user.clone(),
        group: settings.group.clone(),
        uid: settings.uid,
        gid: settings.gid,
        workdir: settings.web_root.clone(),
        expose_port: settings.upstream_port,
        command: vec![FPM_COMMAND.into()],
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn app(name: &str, port: u16, path: &str) -> ApplicationDescriptor {
        ApplicationDescriptor::new(name, port, path)
    }

    #[test]
    fn two_apps_share_one_webserver() {
        let apps = [app("app1", 8080, "src/app1"), app("app2", 8081, "src/app2")];
        let (proxy, manifest) = compose(&apps, &StackSettings::default()).unwrap();

        assert_eq!(proxy.server_blocks.len(), 2);
        assert_eq!(proxy.listen_ports(), vec![8080, 8081]);
        assert_eq!(proxy.server_blocks[0].root, "/var/www/html/app1");
        assert_eq!(proxy.server_blocks[1].root, "/var/www/html/app2");

        assert_eq!(manifest.services().len(), 2);
        let ports: Vec<String> =
            manifest.webserver.ports.iter().map(ToString::to_string).collect();
        assert_eq!(ports, vec!["8080:8080", "8081:8081"]);
        assert!(manifest.backend.ports.is_empty());
    }

    #[test]
    fn both_services_mount_every_app() {
        let apps = [app("app1", 8080, "src/app1"), app("app2", 8081, "src/app2")];
        let (_, manifest) = compose(&apps, &StackSettings::default()).unwrap();

        for service in manifest.services() {
            let volumes: Vec<String> = service.volumes.iter().map(ToString::to_string).collect();
            assert!(volumes.contains(&"./src/app1:/var/www/html/app1".to_string()));
            assert!(volumes.contains(&"./src/app2:/var/www/html/app2".to_string()));
        }
        assert_eq!(manifest.webserver.volumes.last().unwrap().container, PROXY_CONFIG_MOUNT);
        assert_eq!(manifest.backend.volumes.last().unwrap().container, RUNTIME_CONFIG_MOUNT);
    }

    #[test]
    fn single_dot_app_maps_port_once() {
        let (proxy, manifest) =
            compose(&[app("app", 8082, ".")], &StackSettings::default()).unwrap();

        assert_eq!(proxy.server_blocks[0].root, "/var/www/html/app");
        assert_eq!(manifest.webserver.ports, vec![PortMapping::same(8082)]);
        assert_eq!(manifest.webserver.volumes[0].to_string(), ".:/var/www/html/app");
    }

    #[test]
    fn upstream_targets_backend_service() {
        let settings = StackSettings { upstream_port: 9001, ..Default::default() };
        let (proxy, _) = compose(&[app("app", 8080, "src")], &settings).unwrap();
        assert_eq!(proxy.server_blocks[0].upstream, "backend:9001");
    }

    #[test]
    fn compose_revalidates_input() {
        let apps = [app("a", 8080, "src/a"), app("b", 8080, "src/b")];
        assert!(matches!(
            compose(&apps, &StackSettings::default()),
            Err(ValidationError::DuplicatePort { port: 8080, .. })
        ));
    }

    #[test]
    fn compose_rejects_invalid_settings() {
        let settings = StackSettings { network: "bad network".into(), ..Default::default() };
        assert!(matches!(
            compose(&[app("a", 8080, "src")], &settings),
            Err(ValidationError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn recipe_unions_and_sorts_extensions() {
        let settings =
            StackSettings { extensions: vec!["zip".into(), "gd".into()], ..Default::default() };
        let apps = [
            app("a", 8080, "src/a").with_extensions(["intl", "gd"]),
            app("b", 8081, "src/b").with_extensions(["bcmath"]),
        ];
        let recipe = image_recipe(&apps, &settings).unwrap();
        assert_eq!(recipe.extensions, vec!["bcmath", "gd", "intl", "zip"]);
        assert_eq!(recipe.expose_port, 9000);
        assert_eq!(recipe.workdir, "/var/www/html");
        assert_eq!(recipe.command, vec!["php-fpm"]);
    }

    #[test]
    fn runtime_config_keeps_limits_first() {
        let mut settings = StackSettings::default();
        settings.ini.insert("memory_limit".into(), "256M".into());
        settings.ini.insert("display_errors".into(), "On".into());
        settings.ini.insert("post_max_size".into(), "1G".into());

        let runtime = runtime_config(&settings);
        let keys: Vec<&str> = runtime.entries.iter().map(|entry| entry.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["upload_max_filesize", "post_max_size", "display_errors", "memory_limit"]
        );
        assert_eq!(runtime.get("post_max_size"), Some("40M"));
    }

    fn descriptor_set() -> impl Strategy<Value = Vec<ApplicationDescriptor>> {
        prop::collection::btree_set("[a-z][a-z0-9_-]{0,7}", 1..6)
            .prop_flat_map(|names| {
                let count = names.len();
                (Just(names), prop::collection::btree_set(1u16..=65535, count..=count))
            })
            .prop_map(|(names, ports)| {
                names
                    .into_iter()
                    .zip(ports)
                    .map(|(name, port)| {
                        let path = format!("src/{}", name);
                        ApplicationDescriptor::new(name, port, path)
                    })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn compose_is_deterministic(apps in descriptor_set()) {
            let settings = StackSettings::default();
            let first = Composition::build(&apps, &settings).unwrap();
            let second = Composition::build(&apps, &settings).unwrap();
            prop_assert_eq!(&first, &second);

            // Input order is preserved and every service count stays at two.
            let names: Vec<&str> =
                first.proxy.server_blocks.iter().map(|b| b.app.as_str()).collect();
            let expected: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
            prop_assert_eq!(names, expected);
            prop_assert_eq!(first.manifest.webserver.ports.len(), apps.len());
        }

        #[test]
        fn duplicated_port_is_always_rejected(
            apps in descriptor_set(),
            pick in any::<prop::sample::Index>(),
        ) {
            let mut apps = apps;
            let source = pick.index(apps.len());
            let duplicated_port = apps[source].listen_port;
            apps.push(ApplicationDescriptor::new("duplicate-port", duplicated_port, "src/dup"));

            let is_duplicate_port = matches!(
                compose(&apps, &StackSettings::default()),
                Err(ValidationError::DuplicatePort { port, .. }) if port == duplicated_port
            );
            prop_assert!(is_duplicate_port);
        }
    }
}
