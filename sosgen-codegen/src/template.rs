//! Template fragments and placeholder substitution.
//!
//! Fragments are plain text with positional placeholders `$0`, `$1`, ...
//! Rendering concatenates fragments in order, then replaces each placeholder
//! with its argument by literal text replacement, one index at a time.
//!
//! Replacement is not a tokenizer. An argument that itself contains `$0`
//! (or any lower index still pending) is rewritten by the later passes, and
//! `$1` also matches the head of `$10`. Placeholders without an argument are
//! left in the output untouched.

/// File preamble: generated-file banner and `using` directives.
pub const HEADER: &str = r#"
// This file is auto-generated. Don't edit it.
using System;
using System.IO;
using UnityEngine;

#if UNITY_EDITOR
using UnityEditor;
#endif
"#;

/// Opens the namespace `$1`.
pub const NAMESPACE_OPEN: &str = r#"
namespace $1 {
"#;

/// Singleton partial class for type `$0` with accessibility `$2`.
pub const BODY: &str = r#"
    $2 partial class $0 {
        private static $0 s_instance;
        public static $0 Instance {
            get {
                if (typeof($0).IsAbstract)
                    throw new InvalidOperationException($"Cannot get instance of abstract type {typeof($0).Name}");
                if (s_instance) {
                    return s_instance;
                }
                s_instance = Resources.Load<$0>(ResourcesPath);
                if (!s_instance) {
                    Debug.LogWarning($"created new instance of {typeof($0).Name}. singleton instance not found at location: {ResourcesPath}");
                    s_instance = CreateInstance<$0>();
                }
                return s_instance;
            }
        }

        protected const string ResourcesFolderPath = "SingletonSOs";
        protected static readonly string ResourcesPath = Path.Combine(ResourcesFolderPath, typeof($0).Name);

        protected virtual void Awake() {
            if (!s_instance || s_instance == this) return;
            Debug.LogError($"{typeof($0).Name} deleted. Another instance is already available.");
#if UNITY_EDITOR
            if (!Application.isPlaying)
                DestroyImmediate(this);
            else
#endif
                Destroy(this);
        }

        protected virtual void OnDestroy() {
            if (s_instance == this) {
                Debug.LogWarning($"{typeof($0).Name} instance destroyed. Singleton instance is no longer available.");
            }
        }

#if UNITY_EDITOR
        /// <summary>
        /// for In-Editor use only. Don't use it.
        /// </summary>
        [MenuItem("Tools/Singleton Scriptable Objects/Game.Core/Select '$0'")]
        static void Editor_SelectInstance() {
            Selection.activeObject = Instance;
            EditorGUIUtility.PingObject(Instance);
        }

        /// <summary>
        /// For In-Editor use only. Don't use it.
        /// </summary>
        [InitializeOnLoadMethod]
        static void Editor_EnsureInstanceExists() {
            if (typeof($0).IsAbstract) return;
            EditorApplication.delayCall += AssetManagementUtils.UpdateResourcesForSingletonAsset<$0>;
        }
#endif

    }
"#;

/// Closes the namespace opened by [`NAMESPACE_OPEN`].
pub const NAMESPACE_CLOSE: &str = r#"
}
"#;

/// Returns the fragments for one singleton unit, in render order.
///
/// The namespace fragments are included only when the type lives in a named
/// namespace.
#[must_use]
pub fn singleton_fragments(has_namespace: bool) -> Vec<&'static str> {
    let mut fragments = Vec::with_capacity(4);
    fragments.push(HEADER);
    if has_namespace {
        fragments.push(NAMESPACE_OPEN);
    }
    fragments.push(BODY);
    if has_namespace {
        fragments.push(NAMESPACE_CLOSE);
    }
    fragments
}

/// Replaces every `$i` in `buf` with `args[i]`, for `i` in argument order.
pub fn substitute(buf: &mut String, args: &[&str]) {
    for (index, value) in args.iter().enumerate() {
        let token = format!("${index}");
        if buf.contains(&token) {
            *buf = buf.replace(&token, value);
        }
    }
}

/// Concatenates `fragments` and substitutes `args` into the result.
#[must_use]
pub fn render(fragments: &[&str], args: &[&str]) -> String {
    let capacity = fragments.iter().map(|f| f.len()).sum();
    let mut buf = String::with_capacity(capacity);
    for fragment in fragments {
        buf.push_str(fragment);
    }
    substitute(&mut buf, args);
    buf
}
